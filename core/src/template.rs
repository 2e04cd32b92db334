//! URL templating with `:marker` path segments.
//!
//! A marker is a path segment that starts with `:`. Everything after the colon
//! up to the next `/` is the marker name, so `/files/:name.json` names
//! `name.json`.
//!
//! Substitution walks the extracted names in order and replaces the first
//! remaining occurrence of the literal text `:name` on each pass. Repeated
//! markers are consumed left to right. The match is textual, not per segment:
//! a literal `:id` that appears before the marker it was meant for is the one
//! that gets replaced.

use std::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::TemplateError;

/// Characters left as-is when encoding a parameter value. Matches the
/// unreserved set of `encodeURIComponent`.
const COMPONENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const MARKER: char = ':';

/// A value substituted into a marker: a string or a number.
///
/// Floats render with ECMAScript number formatting (`1e+21`, `1e-7`,
/// `Infinity`), integers in plain decimal.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(s) => f.write_str(s),
            ParamValue::Int(n) => write!(f, "{n}"),
            ParamValue::UInt(n) => write!(f, "{n}"),
            ParamValue::Float(n) => f.write_str(ryu_js::Buffer::new().format(*n)),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        ParamValue::Str(value.clone())
    }
}

macro_rules! param_value_from {
    ($variant:ident as $target:ty: $($t:ty),+) => {
        $(
            impl From<$t> for ParamValue {
                fn from(value: $t) -> Self {
                    ParamValue::$variant(<$target>::from(value))
                }
            }
        )+
    };
}

param_value_from!(Int as i64: i8, i16, i32, i64);
param_value_from!(UInt as u64: u8, u16, u32, u64);
param_value_from!(Float as f64: f32, f64);

/// Named values for the markers of a URL pattern.
///
/// Insertion order is kept; setting a name twice overwrites the first value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: Vec<(String, ParamValue)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chainable insert.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Params
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

/// Marker names in `pattern`, in order of appearance. Duplicates are kept.
pub fn extract_markers(pattern: &str) -> Vec<String> {
    pattern
        .split('/')
        .filter_map(|segment| segment.strip_prefix(MARKER))
        .map(str::to_string)
        .collect()
}

/// Percent-encode a single value the way `encodeURIComponent` does.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT_ENCODE_SET).to_string()
}

/// Substitute every marker in `pattern` with its encoded value from `params`.
///
/// Fails if the pattern has no markers at all, or if any marker lacks a value
/// (all missing names are reported, each once).
pub fn render(pattern: &str, params: &Params) -> Result<String, TemplateError> {
    let markers = extract_markers(pattern);
    if markers.is_empty() {
        return Err(TemplateError::NoMarkers);
    }

    let mut missing: Vec<String> = Vec::new();
    for name in &markers {
        if params.get(name).is_none() && !missing.contains(name) {
            missing.push(name.clone());
        }
    }
    if !missing.is_empty() {
        return Err(TemplateError::MissingParameters(missing));
    }

    let mut url = pattern.to_string();
    for name in &markers {
        if let Some(value) = params.get(name) {
            let token = format!("{MARKER}{name}");
            url = url.replacen(&token, &encode_component(&value.to_string()), 1);
        }
    }
    Ok(url)
}
