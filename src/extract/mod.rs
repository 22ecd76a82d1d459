//! Field extraction from a decoded sitecheck result object.
//!
//! An [`ExtractionContext`] borrows one decoded object for the duration of a
//! single message and pulls typed fields out of it through a [`FieldSchema`].
//! Missing keys are tolerated (older and newer publishers differ in which
//! fields they send); values that are present but cannot be coerced are errors.

mod coerce;
mod schema;
mod timestamp;

use log::trace;
use thiserror::Error;

use crate::decode::{Object, Value};
use coerce::{coerce, coerce_mapping, first_non_empty, lookup, Coerced};

pub use schema::{Field, FieldKind, FieldSchema, SchemaError};

/// Errors raised while extracting a field that is present but malformed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractError {
    /// The raw value cannot be coerced to the field's type.
    #[error("cannot coerce field `{field}`: {reason}")]
    Coercion { field: &'static str, reason: String },

    /// The check timestamp is missing its date or cannot be parsed.
    #[error("invalid timestamp in field `{field}`: {reason}")]
    Timestamp { field: &'static str, reason: String },
}

/// Matched category label and IP-range id, taken together from one field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchType {
    pub label: Option<String>,
    pub ip_range_id: Option<i64>,
}

/// Typed values of every field in a sitecheck result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedFields {
    pub url: Option<String>,
    pub ip: Option<String>,
    pub data: bool,
    pub green: bool,
    pub cached: bool,
    pub hosting_provider_id: Option<i64>,
    pub match_type: MatchType,
    /// Already rendered as `YYYY-MM-DD HH:MM:SS`
    pub checked_at: Option<String>,
}

/// Per-message view over a decoded result object.
pub struct ExtractionContext<'a> {
    schema: &'a FieldSchema,
    object: &'a Object,
}

impl<'a> ExtractionContext<'a> {
    pub fn new(schema: &'a FieldSchema, object: &'a Object) -> Self {
        Self { schema, object }
    }

    /// Extracts every field the schema knows about.
    pub fn extract_fields(&self) -> Result<ExtractedFields, ExtractError> {
        Ok(ExtractedFields {
            url: self.text(Field::Url)?,
            ip: self.text(Field::Ip)?,
            data: self.flag(Field::Data)?,
            green: self.flag(Field::Green)?,
            cached: self.flag(Field::Cached)?,
            hosting_provider_id: self.integer(Field::HostingProviderId)?,
            match_type: self.match_type()?,
            checked_at: self.checked_at()?,
        })
    }

    /// Raw decoded value of `field`, if the key is present.
    pub fn raw(&self, field: Field) -> Option<&'a Value> {
        let value = self.object.fields.get(self.schema.key(field));
        trace!("{} -> {:?}", field.legacy_name(), value.map(Value::kind));
        value
    }

    /// Text field. Address fields also accept a mapping of variants and keep
    /// the first non-empty one.
    pub fn text(&self, field: Field) -> Result<Option<String>, ExtractError> {
        let Some(coerced) = self.coerced(field)? else {
            return Ok(None);
        };
        let coerced = match coerced {
            Coerced::Map(entries) if field.kind() == FieldKind::Address => {
                match first_non_empty(entries) {
                    Some(value) => value,
                    None => return Ok(None),
                }
            }
            other => other,
        };
        match coerced {
            Coerced::Null => Ok(None),
            Coerced::Text(s) => Ok(Some(s)),
            Coerced::Int(i) => Ok(Some(i.to_string())),
            other => Err(mismatch(field, "text", &other)),
        }
    }

    /// Boolean field; absent and null read as `false`.
    pub fn flag(&self, field: Field) -> Result<bool, ExtractError> {
        match self.coerced(field)? {
            None | Some(Coerced::Null) => Ok(false),
            Some(Coerced::Bool(b)) => Ok(b),
            Some(Coerced::Int(i)) => Ok(i != 0),
            Some(other) => Err(mismatch(field, "bool", &other)),
        }
    }

    /// Integer field; decimal text is accepted.
    ///
    /// The checker writes `false` when it found no id, so a boolean reads as
    /// absent and the check ends up unresolved rather than dropped.
    pub fn integer(&self, field: Field) -> Result<Option<i64>, ExtractError> {
        match self.coerced(field)? {
            None | Some(Coerced::Null) | Some(Coerced::Bool(_)) => Ok(None),
            Some(coerced) => as_integer(&coerced)
                .map(Some)
                .ok_or_else(|| mismatch(field, "int", &coerced)),
        }
    }

    /// The `matchtype` field: a nested `{type, id}` structure.
    pub fn match_type(&self) -> Result<MatchType, ExtractError> {
        let field = Field::MatchType;
        let entries = match self.coerced(field)? {
            None | Some(Coerced::Null) => return Ok(MatchType::default()),
            Some(Coerced::Map(entries)) => entries,
            Some(other) => return Err(mismatch(field, "array", &other)),
        };

        let label = match lookup(&entries, "type") {
            None | Some(Coerced::Null) => None,
            Some(Coerced::Text(s)) => Some(s.clone()),
            Some(other) => return Err(mismatch(field, "text type", other)),
        };
        let ip_range_id = match lookup(&entries, "id") {
            None | Some(Coerced::Null) => None,
            Some(other) => Some(
                as_integer(other).ok_or_else(|| mismatch(field, "int id", other))?,
            ),
        };

        Ok(MatchType { label, ip_range_id })
    }

    /// The `checkedAt` field: a nested `DateTime` whose `date` entry is
    /// reparsed and rendered as `YYYY-MM-DD HH:MM:SS`.
    pub fn checked_at(&self) -> Result<Option<String>, ExtractError> {
        let field = Field::CheckedAt;
        let name = field.legacy_name();
        let fields = match self.raw(field) {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::Object(object)) => &object.fields,
            Some(Value::Map(mapping)) => mapping,
            Some(other) => {
                return Err(ExtractError::Timestamp {
                    field: name,
                    reason: format!("expected a DateTime object, found {}", other.kind()),
                })
            }
        };

        let entries = coerce_mapping(fields).map_err(|e| ExtractError::Timestamp {
            field: name,
            reason: e.to_string(),
        })?;
        let raw_date = match lookup(&entries, "date") {
            Some(Coerced::Text(date)) => date,
            _ => {
                return Err(ExtractError::Timestamp {
                    field: name,
                    reason: "no date value".to_string(),
                })
            }
        };

        let parsed =
            timestamp::parse_legacy_datetime(raw_date).ok_or_else(|| ExtractError::Timestamp {
                field: name,
                reason: format!("unparseable date `{raw_date}`"),
            })?;
        Ok(Some(timestamp::format_checked_at(&parsed)))
    }

    fn coerced(&self, field: Field) -> Result<Option<Coerced>, ExtractError> {
        self.raw(field)
            .map(coerce)
            .transpose()
            .map_err(|e| ExtractError::Coercion {
                field: field.legacy_name(),
                reason: e.to_string(),
            })
    }
}

fn as_integer(value: &Coerced) -> Option<i64> {
    match value {
        Coerced::Int(i) => Some(*i),
        Coerced::Text(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn mismatch(field: Field, expected: &str, found: &Coerced) -> ExtractError {
    ExtractError::Coercion {
        field: field.legacy_name(),
        reason: format!("expected {expected}, found {found:?}"),
    }
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
