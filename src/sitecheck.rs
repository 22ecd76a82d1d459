//! Canonical sitecheck record.
//!
//! A [`SiteCheck`] is assembled once per message from the extracted fields and
//! is never modified afterwards.

use serde::Serialize;
use thiserror::Error;

use crate::extract::ExtractedFields;

/// A field required for a minimal valid record is absent.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("required field `{0}` is missing")]
pub struct MissingFieldError(pub &'static str);

/// One greencheck result, as published by the legacy checker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteCheck {
    pub url: String,
    pub ip: String,
    pub data_present: bool,
    pub is_green: bool,
    pub hosting_provider_id: Option<i64>,
    /// `YYYY-MM-DD HH:MM:SS`
    pub checked_at: String,
    pub match_type: Option<String>,
    pub match_ip_range_id: Option<i64>,
    pub cached: bool,
}

impl SiteCheck {
    /// Builds a record from extracted fields.
    ///
    /// Only `url` and `checked_at` are required; an empty url counts as missing.
    pub fn from_fields(fields: ExtractedFields) -> Result<Self, MissingFieldError> {
        let url = fields
            .url
            .filter(|url| !url.is_empty())
            .ok_or(MissingFieldError("checkedUrl"))?;
        let checked_at = fields.checked_at.ok_or(MissingFieldError("checkedAt"))?;

        Ok(Self {
            url,
            ip: fields.ip.unwrap_or_default(),
            data_present: fields.data,
            is_green: fields.green,
            hosting_provider_id: fields.hosting_provider_id,
            checked_at,
            match_type: fields.match_type.label,
            match_ip_range_id: fields.match_type.ip_range_id,
            cached: fields.cached,
        })
    }
}
