//! HTTP request and response values exchanged with a [`Transport`].
//!
//! # Design
//! Requests and responses are plain data. The builder produces an
//! `HttpRequest`, a transport turns it into an `HttpResponse`, and the builder
//! parses that response. Nothing in here touches the network, so building and
//! parsing can be tested without a server.
//!
//! [`Transport`]: crate::transport::Transport

use std::fmt;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// Built by the `Messager::build_*` methods and handed to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// This is the raw response every verb hands back, whatever the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// `true` for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First value of the header `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn content_kind(&self) -> ContentKind {
        self.header("content-type")
            .map(ContentKind::from_header)
            .unwrap_or(ContentKind::Unsupported)
    }
}

/// How a successful response body gets decoded, chosen from its
/// `Content-Type` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// `application/text`, kept as a string.
    Text,
    /// `application/json`, parsed into a `serde_json::Value`.
    Json,
    /// Anything else. The body is left undecoded.
    Unsupported,
}

impl ContentKind {
    /// Classify a raw `Content-Type` value. Parameters such as `charset` are
    /// ignored and the media type is matched case-insensitively.
    pub fn from_header(value: &str) -> Self {
        let media_type = value.split(';').next().unwrap_or_default().trim();
        if media_type.eq_ignore_ascii_case("application/json") {
            ContentKind::Json
        } else if media_type.eq_ignore_ascii_case("application/text") {
            ContentKind::Text
        } else {
            ContentKind::Unsupported
        }
    }
}
