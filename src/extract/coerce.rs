//! Coercion of decoded values into tidier shapes.

use std::str::Utf8Error;

use crate::decode::{Mapping, Value};

/// A decoded value with its byte strings turned into text.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Coerced {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Map(Vec<(String, Coerced)>),
}

impl Coerced {
    /// Whether the value counts as "present" when choosing between variants.
    ///
    /// Null, `false`, zero, empty text, and empty mappings are empty.
    pub(crate) fn is_empty(&self) -> bool {
        match self {
            Coerced::Null => true,
            Coerced::Bool(b) => !b,
            Coerced::Int(i) => *i == 0,
            Coerced::Float(f) => *f == 0.0,
            Coerced::Text(s) => s.is_empty(),
            Coerced::Map(entries) => entries.is_empty(),
        }
    }
}

/// Coerces a decoded value: byte strings become UTF-8 text, scalars pass
/// through, and mappings and objects are coerced entry by entry.
pub(crate) fn coerce(value: &Value) -> Result<Coerced, Utf8Error> {
    Ok(match value {
        Value::Null => Coerced::Null,
        Value::Bool(b) => Coerced::Bool(*b),
        Value::Int(i) => Coerced::Int(*i),
        Value::Float(f) => Coerced::Float(*f),
        Value::Bytes(bytes) => Coerced::Text(std::str::from_utf8(bytes)?.to_string()),
        Value::Map(mapping) => Coerced::Map(coerce_mapping(mapping)?),
        Value::Object(object) => Coerced::Map(coerce_mapping(&object.fields)?),
    })
}

/// Coerces every key and value of a mapping, preserving order.
pub(crate) fn coerce_mapping(mapping: &Mapping) -> Result<Vec<(String, Coerced)>, Utf8Error> {
    mapping
        .iter()
        .map(|(key, value)| Ok((std::str::from_utf8(key)?.to_string(), coerce(value)?)))
        .collect()
}

/// Picks the first non-empty value among several representations.
///
/// Used for address fields that carry both IPv4 and IPv6 variants. No attempt
/// is made to check the chosen value is a well-formed address.
pub(crate) fn first_non_empty(entries: Vec<(String, Coerced)>) -> Option<Coerced> {
    entries
        .into_iter()
        .map(|(_, value)| value)
        .find(|value| !value.is_empty())
}

/// Looks up `key` among coerced mapping entries.
pub(crate) fn lookup<'a>(entries: &'a [(String, Coerced)], key: &str) -> Option<&'a Coerced> {
    entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
}
