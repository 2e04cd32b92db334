//! Transport-level settings applied to every request a builder issues.

/// Header bag carried by a `Messager` and copied into each request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Append a header. Earlier headers are kept.
    pub fn push_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.push((name.into(), value.into()));
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.headers.iter().any(|(key, _)| key.eq_ignore_ascii_case(name))
    }

    /// Replace all headers with bearer authorization and a keep-alive hint.
    ///
    /// Any header set before this call is dropped, not merged.
    pub fn set_bearer_token(&mut self, token: &str) {
        self.headers = vec![
            ("authorization".to_string(), format!("Bearer {token}")),
            ("connection".to_string(), "keepalive".to_string()),
        ];
    }
}
