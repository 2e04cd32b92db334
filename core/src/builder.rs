//! Chainable request builder.
//!
//! # Design
//! `Messager` is a plain value: every setter consumes it and returns the
//! updated builder, so a configured builder can be cloned and reused without
//! two requests ever sharing mutable state. Each verb is split the same way:
//! `build_*` produces an `HttpRequest`, the transport executes it, and
//! `parse` turns the `HttpResponse` into a `Fetched` result. The async verbs
//! simply chain the three steps.

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::error::MessagerError;
use crate::http::{ContentKind, HttpMethod, HttpRequest, HttpResponse};
use crate::options::RequestOptions;
use crate::schema::{Decoded, NoSchema, Schema};
use crate::template::{self, Params};
use crate::transport::Transport;

/// Result of GET, POST and PATCH.
///
/// `data` is `None` exactly when the response status is not 2xx.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    pub rs: HttpResponse,
    pub data: Option<T>,
}

/// Result of DELETE: the raw response only, no decoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deleted {
    pub req: HttpResponse,
}

/// Request builder over a transport `Tr`, validating bodies with `S`.
#[derive(Debug, Clone)]
pub struct Messager<Tr, S = NoSchema> {
    transport: Tr,
    url: String,
    schema: S,
    options: RequestOptions,
}

impl<Tr> Messager<Tr> {
    pub fn new(transport: Tr) -> Self {
        Self {
            transport,
            url: String::new(),
            schema: NoSchema,
            options: RequestOptions::default(),
        }
    }
}

#[cfg(feature = "reqwest")]
impl Default for Messager<reqwest::Client> {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}

impl<Tr, S> Messager<Tr, S> {
    /// Use `url` verbatim. No marker handling.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Render `pattern` with `params` and use the result as the URL.
    pub fn url_with(mut self, pattern: &str, params: &Params) -> Result<Self, MessagerError> {
        self.url = template::render(pattern, params)?;
        Ok(self)
    }

    /// Validate every successful body with `schema` from now on.
    pub fn schema<S2>(self, schema: S2) -> Messager<Tr, S2> {
        Messager {
            transport: self.transport,
            url: self.url,
            schema,
            options: self.options,
        }
    }

    /// Send `Authorization: Bearer <token>` and a keep-alive hint.
    ///
    /// Replaces every header set so far, including ones added with
    /// [`header`](Self::header).
    pub fn with_bearer_token(mut self, token: &str) -> Self {
        self.options.set_bearer_token(token);
        self
    }

    /// Add a header to every subsequent request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.push_header(name, value);
        self
    }

    pub fn current_url(&self) -> &str {
        &self.url
    }

    pub fn options(&self) -> &RequestOptions {
        &self.options
    }

    pub fn transport(&self) -> &Tr {
        &self.transport
    }

    pub fn build_get(&self) -> Result<HttpRequest, MessagerError> {
        self.build(HttpMethod::Get, None)
    }

    /// A `Some` body is sent as JSON with `content-type: application/json`,
    /// unless a content type was already set with [`header`](Self::header).
    pub fn build_post<B>(&self, body: Option<&B>) -> Result<HttpRequest, MessagerError>
    where
        B: Serialize + ?Sized,
    {
        self.build(HttpMethod::Post, serialize_body(body)?)
    }

    /// Same body and content-type handling as [`build_post`](Self::build_post).
    pub fn build_patch<B>(&self, body: Option<&B>) -> Result<HttpRequest, MessagerError>
    where
        B: Serialize + ?Sized,
    {
        self.build(HttpMethod::Patch, serialize_body(body)?)
    }

    pub fn build_delete(&self) -> Result<HttpRequest, MessagerError> {
        self.build(HttpMethod::Delete, None)
    }

    fn build(&self, method: HttpMethod, body: Option<String>) -> Result<HttpRequest, MessagerError> {
        if self.url.is_empty() {
            return Err(MessagerError::NoUrlConfigured);
        }

        let mut headers = self.options.headers().to_vec();
        if body.is_some() && !self.options.has_header("content-type") {
            headers.push(("content-type".to_string(), "application/json".to_string()));
        }

        Ok(HttpRequest {
            method,
            url: self.url.clone(),
            headers,
            body,
        })
    }
}

impl<Tr, S: Schema> Messager<Tr, S> {
    /// Decode and validate a response to GET, POST or PATCH.
    ///
    /// A non-2xx response is returned without data and is not an error.
    pub fn parse(&self, response: HttpResponse) -> Result<Fetched<S::Output>, MessagerError> {
        if !response.is_success() {
            return Ok(Fetched {
                rs: response,
                data: None,
            });
        }

        let decoded = decode_body(&response)?;
        let data = self
            .schema
            .parse(decoded)
            .map_err(|e| MessagerError::Validation(Box::new(e)))?;

        Ok(Fetched {
            rs: response,
            data: Some(data),
        })
    }
}

impl<Tr: Transport, S: Schema> Messager<Tr, S> {
    pub async fn get(&self) -> Result<Fetched<S::Output>, MessagerError> {
        let request = self.build_get()?;
        let response = self.send(request).await?;
        self.parse(response)
    }

    /// POST `body` as JSON. `None` sends no body.
    pub async fn post<B>(&self, body: Option<&B>) -> Result<Fetched<S::Output>, MessagerError>
    where
        B: Serialize + ?Sized,
    {
        let request = self.build_post(body)?;
        let response = self.send(request).await?;
        self.parse(response)
    }

    pub async fn post_empty(&self) -> Result<Fetched<S::Output>, MessagerError> {
        self.post(None::<&()>).await
    }

    /// PATCH `body` as JSON. `None` sends no body.
    pub async fn patch<B>(&self, body: Option<&B>) -> Result<Fetched<S::Output>, MessagerError>
    where
        B: Serialize + ?Sized,
    {
        let request = self.build_patch(body)?;
        let response = self.send(request).await?;
        self.parse(response)
    }

    pub async fn patch_empty(&self) -> Result<Fetched<S::Output>, MessagerError> {
        self.patch(None::<&()>).await
    }

    pub async fn delete(&self) -> Result<Deleted, MessagerError> {
        let request = self.build_delete()?;
        let response = self.send(request).await?;
        Ok(Deleted { req: response })
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, MessagerError> {
        debug!(method = %request.method, url = %request.url, "dispatching request");
        let response = self
            .transport
            .execute(request)
            .await
            .map_err(|e| MessagerError::Transport(Box::new(e)))?;
        debug!(status = response.status, "response received");
        Ok(response)
    }
}

fn serialize_body<B>(body: Option<&B>) -> Result<Option<String>, MessagerError>
where
    B: Serialize + ?Sized,
{
    body.map(serde_json::to_string)
        .transpose()
        .map_err(MessagerError::Serialization)
}

fn decode_body(response: &HttpResponse) -> Result<Decoded, MessagerError> {
    let kind = response.content_kind();
    trace!(?kind, "decoding response body");
    match kind {
        ContentKind::Text => Ok(Decoded::Text(response.body.clone())),
        ContentKind::Json => serde_json::from_str(&response.body)
            .map(Decoded::Json)
            .map_err(|e| {
                warn!(error = %e, "json response body failed to parse");
                MessagerError::Decode(e)
            }),
        ContentKind::Unsupported => Ok(Decoded::Undecoded),
    }
}
