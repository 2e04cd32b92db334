//! Chainable HTTP request builder with URL templating and schema-validated
//! response bodies.
//!
//! # Overview
//! A [`Messager`] holds a URL, an optional [`Schema`] and request options.
//! Setters chain by value; the async verbs `get`, `post`, `patch` and
//! `delete` run one round trip through a [`Transport`] and return the raw
//! response alongside the decoded, optionally validated body.
//!
//! ```no_run
//! # async fn demo() -> Result<(), messager_core::MessagerError> {
//! use messager_core::{Messager, Params};
//!
//! let fetched = Messager::default()
//!     .url_with("https://api.example.com/users/:id", &Params::new().set("id", 42))?
//!     .with_bearer_token("token")
//!     .get()
//!     .await?;
//! println!("{} {:?}", fetched.rs.status, fetched.data);
//! # Ok(())
//! # }
//! ```
//!
//! # Design
//! - No shared state: each builder value is its own request configuration.
//! - Each verb splits into `build_*` (produces an [`HttpRequest`]) and
//!   [`Messager::parse`] (consumes an [`HttpResponse`]), so everything but
//!   the round trip itself is testable offline.
//! - A non-2xx status is data, not an error.

pub mod builder;
pub mod error;
pub mod http;
pub mod options;
pub mod schema;
pub mod template;
pub mod transport;

pub use builder::{Deleted, Fetched, Messager};
pub use error::{BoxError, MessagerError, TemplateError};
pub use http::{ContentKind, HttpMethod, HttpRequest, HttpResponse};
pub use options::RequestOptions;
pub use schema::{Decoded, FnSchema, NoSchema, Schema, Typed, ValidationError};
pub use template::{ParamValue, Params};
pub use transport::Transport;
