//! The outbound HTTP collaborator.
//!
//! [`Transport`] decouples the builder from any particular HTTP client. A
//! `reqwest::Client` implementation ships behind the default `reqwest`
//! feature; tests and other runtimes can plug in their own.

use std::future::Future;

use crate::http::{HttpRequest, HttpResponse};

/// Executes a single request and returns the full response.
pub trait Transport: Send + Sync {
    /// Error for a request that produced no response (connect, DNS, TLS,
    /// malformed request).
    type Error: std::error::Error + Send + Sync + 'static;

    /// Sends `request` and reads the whole body. A non-2xx status is a
    /// response, not an error.
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, Self::Error>> + Send;
}

impl<T: Transport> Transport for &T {
    type Error = T::Error;

    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, Self::Error>> + Send {
        (**self).execute(request)
    }
}

#[cfg(feature = "reqwest")]
mod reqwest_client {
    use super::Transport;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    impl Transport for reqwest::Client {
        type Error = reqwest::Error;

        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, Self::Error> {
            let method = match request.method {
                HttpMethod::Get => reqwest::Method::GET,
                HttpMethod::Post => reqwest::Method::POST,
                HttpMethod::Patch => reqwest::Method::PATCH,
                HttpMethod::Delete => reqwest::Method::DELETE,
            };

            let mut builder = self.request(method, &request.url);
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await?;
            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .map(|(name, value)| {
                    (
                        name.as_str().to_string(),
                        String::from_utf8_lossy(value.as_bytes()).into_owned(),
                    )
                })
                .collect();
            let body = response.text().await?;

            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        }
    }
}
