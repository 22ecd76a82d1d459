//! Decoder for the legacy PHP `serialize()` wire format.
//!
//! Greencheck results are published by the legacy checker as a serialized
//! PHP array. This module turns those bytes into a [`Value`] tree without
//! interpreting any of it: byte strings stay raw bytes, because several
//! "string-shaped" fields are really nested structures that the extractor
//! has to look at first.
//!
//! Key functions:
//! - `decode()` - Decodes a whole buffer into a [`Value`]
//! - `decode_envelope()` - Decodes a buffer and returns the tagged object under the result key

mod parser;

#[cfg(test)]
pub(crate) mod test_support;

use thiserror::Error;

use parser::Parser;

/// Errors raised while decoding a serialized message.
///
/// Every positional variant carries the byte offset where decoding stopped so
/// a dropped message can be inspected by hand.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// The buffer ended in the middle of a value.
    #[error("unexpected end of input at byte {offset}")]
    UnexpectedEof { offset: usize },

    /// A value started with a type tag this decoder does not understand.
    #[error("unrecognized type tag '{tag}' at byte {offset}")]
    UnknownTag { tag: char, offset: usize },

    /// A framing delimiter was missing.
    #[error("expected '{expected}' at byte {offset}, found '{found}'")]
    UnexpectedByte {
        expected: char,
        found: char,
        offset: usize,
    },

    /// A length prefix, integer, or float could not be parsed.
    #[error("invalid number at byte {offset}")]
    InvalidNumber { offset: usize },

    /// A mapping key was neither an integer nor a byte string.
    #[error("invalid mapping key at byte {offset}")]
    InvalidKey { offset: usize },

    /// Nesting went deeper than the decoder allows.
    #[error("nesting deeper than {limit} levels at byte {offset}")]
    TooDeep { limit: usize, offset: usize },

    /// Bytes remained after the root value.
    #[error("trailing bytes after root value at byte {offset}")]
    TrailingBytes { offset: usize },

    /// The root value is not a mapping.
    #[error("root value is not a mapping")]
    RootNotMapping,

    /// The root mapping has no entry under the result key.
    #[error("missing top-level key `{0}`")]
    MissingResult(String),

    /// The result entry exists but is not a tagged object.
    #[error("top-level key `{0}` does not hold an object")]
    ResultNotObject(String),
}

/// Ordered key/value pairs of a PHP array or object.
///
/// Keys are raw bytes; integer keys are kept as their decimal text. A
/// repeated key replaces the earlier value in place, which is how PHP builds
/// arrays.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mapping {
    entries: Vec<(Vec<u8>, Value)>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value` under `key`, replacing any existing value for that key.
    pub fn insert(&mut self, key: Vec<u8>, value: Value) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &[u8]) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_slice() == key)
            .map(|(_, v)| v)
    }

    /// Removes and returns the value stored under `key`.
    pub fn remove(&mut self, key: &[u8]) -> Option<Value> {
        let index = self.entries.iter().position(|(k, _)| k.as_slice() == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_slice(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A serialized PHP object: class name plus its property table.
///
/// Private properties keep their mangled `"\0Class\0name"` keys.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    pub class: String,
    pub fields: Mapping,
}

/// Generic decoded value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Bytes(Vec<u8>),
    Map(Mapping),
    Object(Object),
}

impl Value {
    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bytes(_) => "string",
            Value::Map(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

/// Decodes one complete serialized value.
///
/// # Errors
///
/// Returns a [`DecodeError`] for truncated input, unknown type tags, broken
/// length-prefix framing, or bytes left over after the root value.
pub fn decode(input: &[u8]) -> Result<Value, DecodeError> {
    let mut parser = Parser::new(input);
    let value = parser.parse_value(0)?;
    parser.finish()?;
    Ok(value)
}

/// Decodes a message and returns the tagged object stored under `result_key`.
///
/// The root must be a mapping and the entry must be an object; anything else
/// is a [`DecodeError`] rather than an empty result.
pub fn decode_envelope(input: &[u8], result_key: &str) -> Result<Object, DecodeError> {
    let mut root = match decode(input)? {
        Value::Map(mapping) => mapping,
        _ => return Err(DecodeError::RootNotMapping),
    };
    match root.remove(result_key.as_bytes()) {
        Some(Value::Object(object)) => Ok(object),
        Some(_) => Err(DecodeError::ResultNotObject(result_key.to_string())),
        None => Err(DecodeError::MissingResult(result_key.to_string())),
    }
}
