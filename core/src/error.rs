//! Error types for the request builder.
//!
//! # Design
//! A non-2xx response is not an error: it comes back as a normal result that
//! carries only the raw response. Everything here is raised either before any
//! network activity (templating, missing URL, body serialization) or passed
//! through from a collaborator (transport, schema) with the original error
//! kept as the source.

use thiserror::Error;

/// Boxed error from a transport or schema, kept intact so callers can
/// downcast to the concrete type.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failures while rendering a URL pattern.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    /// Parameters were supplied but the pattern has no `:marker` segment.
    #[error("no parameter markers found in url pattern")]
    NoMarkers,

    /// One or more markers have no value. Lists every missing name.
    #[error("missing parameters: {}", .0.join(", "))]
    MissingParameters(Vec<String>),
}

/// Errors returned by `Messager` verbs and setters.
#[derive(Debug, Error)]
pub enum MessagerError {
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// A verb ran before any URL was set.
    #[error("no url configured, set one with .url()")]
    NoUrlConfigured,

    /// The request body could not be serialized to JSON.
    #[error("request body serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The transport failed before a response arrived.
    #[error(transparent)]
    Transport(BoxError),

    /// A successful response advertised JSON but the body did not parse.
    #[error("response body is not valid json: {0}")]
    Decode(#[source] serde_json::Error),

    /// The configured schema rejected the decoded body.
    #[error(transparent)]
    Validation(BoxError),
}
