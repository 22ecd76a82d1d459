//! Field schema for sitecheck result objects.
//!
//! The legacy checker serializes private properties under mangled keys of the
//! form `"\0<Class>\0<property>"`. The schema computes every key once, up
//! front, so extraction is a plain lookup.

use std::collections::HashMap;

use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use thiserror::Error;

/// Canonical sitecheck fields carried by a result message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Field {
    Ip,
    Url,
    Data,
    Green,
    Cached,
    HostingProviderId,
    MatchType,
    CheckedAt,
}

/// How a raw field value is coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// UTF-8 text
    Text,
    /// Text, or a mapping of address variants collapsed to the first non-empty one
    Address,
    /// Boolean flag
    Flag,
    /// Integer identifier
    Integer,
    /// Nested `{type, id}` structure
    MatchType,
    /// Nested `DateTime` object
    Timestamp,
}

impl Field {
    /// Property name used by the legacy checker.
    pub fn legacy_name(self) -> &'static str {
        match self {
            Field::Ip => "ip",
            Field::Url => "checkedUrl",
            Field::Data => "data",
            Field::Green => "green",
            Field::Cached => "cached",
            Field::HostingProviderId => "idHostingProvider",
            Field::MatchType => "matchtype",
            Field::CheckedAt => "checkedAt",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::Ip => FieldKind::Address,
            Field::Url => FieldKind::Text,
            Field::Data | Field::Green | Field::Cached => FieldKind::Flag,
            Field::HostingProviderId => FieldKind::Integer,
            Field::MatchType => FieldKind::MatchType,
            Field::CheckedAt => FieldKind::Timestamp,
        }
    }
}

/// Errors raised when a schema cannot be built.
#[derive(Error, Debug, PartialEq)]
pub enum SchemaError {
    #[error("class namespace must not be empty")]
    EmptyNamespace,

    #[error("class namespace must not contain NUL bytes")]
    NulInNamespace,

    #[error("fields `{0}` and `{1}` map to the same raw key")]
    DuplicateKey(&'static str, &'static str),
}

/// Mapping from canonical field to the raw key it is stored under.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    namespace: String,
    keys: HashMap<Field, Vec<u8>>,
}

impl FieldSchema {
    /// Builds and validates the schema for a class namespace.
    pub fn new(namespace: &str) -> Result<Self, SchemaError> {
        if namespace.is_empty() {
            return Err(SchemaError::EmptyNamespace);
        }
        if namespace.contains('\0') {
            return Err(SchemaError::NulInNamespace);
        }

        let mut keys: HashMap<Field, Vec<u8>> = HashMap::new();
        for field in Field::iter() {
            let key = mangle(namespace, field.legacy_name());
            if let Some((other, _)) = keys.iter().find(|(_, existing)| **existing == key) {
                return Err(SchemaError::DuplicateKey(
                    other.legacy_name(),
                    field.legacy_name(),
                ));
            }
            keys.insert(field, key);
        }

        Ok(Self {
            namespace: namespace.to_string(),
            keys,
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Raw key for `field`.
    pub fn key(&self, field: Field) -> &[u8] {
        // Every field is inserted by `new`, so the lookup cannot miss
        self.keys.get(&field).map(Vec::as_slice).unwrap_or_default()
    }
}

fn mangle(namespace: &str, property: &str) -> Vec<u8> {
    format!("\0{namespace}\0{property}").into_bytes()
}
