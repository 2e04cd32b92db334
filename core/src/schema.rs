//! Validation of decoded response bodies.
//!
//! # Design
//! A [`Schema`] turns a [`Decoded`] body into the caller's output type or
//! fails with its own error. The builder never inspects that error; it is
//! boxed and handed back as `MessagerError::Validation`.
//!
//! - [`NoSchema`] passes the decoded body through untouched.
//! - [`Typed`] validates by deserializing into any `DeserializeOwned` type.
//! - [`FnSchema`] wraps a closure for ad-hoc checks.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::BoxError;

/// A successful response body after content-type dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    Text(String),
    Json(Value),
    /// The content type was neither text nor JSON; the body was not decoded.
    Undecoded,
}

impl Decoded {
    /// JSON view of the body: text becomes a JSON string, undecoded becomes
    /// `null`.
    pub fn into_value(self) -> Value {
        match self {
            Decoded::Text(text) => Value::String(text),
            Decoded::Json(value) => value,
            Decoded::Undecoded => Value::Null,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Decoded::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Decoded::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Parses a decoded body into `Output`, failing on invalid input.
pub trait Schema {
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    fn parse(&self, data: Decoded) -> Result<Self::Output, Self::Error>;
}

/// Default schema: returns the decoded body as is.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSchema;

impl Schema for NoSchema {
    type Output = Decoded;
    type Error = std::convert::Infallible;

    fn parse(&self, data: Decoded) -> Result<Decoded, Self::Error> {
        Ok(data)
    }
}

/// Validates by deserializing the body's JSON view into `T`.
pub struct Typed<T>(PhantomData<fn() -> T>);

impl<T> Typed<T> {
    pub fn new() -> Self {
        Typed(PhantomData)
    }
}

impl<T> Default for Typed<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Typed<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Typed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Typed<{}>", std::any::type_name::<T>())
    }
}

impl<T: DeserializeOwned> Schema for Typed<T> {
    type Output = T;
    type Error = serde_json::Error;

    fn parse(&self, data: Decoded) -> Result<T, serde_json::Error> {
        serde_json::from_value(data.into_value())
    }
}

/// Schema backed by a closure.
#[derive(Clone)]
pub struct FnSchema<F>(F);

impl<F> FnSchema<F> {
    pub fn new(f: F) -> Self {
        FnSchema(f)
    }
}

impl<F> fmt::Debug for FnSchema<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnSchema")
    }
}

impl<F, T> Schema for FnSchema<F>
where
    F: Fn(Decoded) -> Result<T, BoxError>,
{
    type Output = T;
    type Error = ValidationError;

    fn parse(&self, data: Decoded) -> Result<T, ValidationError> {
        (self.0)(data).map_err(ValidationError)
    }
}

/// Error raised by an [`FnSchema`] closure.
#[derive(Debug)]
pub struct ValidationError(pub BoxError);

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed: {}", self.0)
    }
}

impl std::error::Error for ValidationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.0.as_ref())
    }
}
