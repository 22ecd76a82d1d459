// storage/models.rs
// Database models and types

use strum_macros::{AsRefStr, EnumString};

/// A hosting provider, as far as the ingest worker needs to know it.
#[derive(Debug, Clone, PartialEq)]
pub struct HostingProvider {
    pub id: i64,
    pub name: String,
    pub website: String,
    pub partner: Option<String>,
}

/// Value of the `green` column of the greencheck log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum GreenFlag {
    Yes,
    No,
}

/// A greencheck log row ready for insertion.
///
/// # Database Schema
///
/// Maps to the `greencheck` table. Provider, IP-range, and `type` columns are
/// only filled for checks hosted by a known provider.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGreencheck<'a> {
    pub hosting_provider_id: Option<i64>,
    pub ip_range_id: Option<i64>,
    pub date: &'a str,
    pub green: GreenFlag,
    pub ip: &'a str,
    pub tld: &'a str,
    pub match_type: Option<&'a str>,
    pub url: &'a str,
}

/// A row of the `greendomain` cache table.
#[derive(Debug, Clone, PartialEq)]
pub struct GreenDomain {
    pub url: String,
    pub hosted_by: String,
    pub hosted_by_id: Option<i64>,
    pub hosted_by_website: String,
    pub partner: Option<String>,
    pub modified: String,
    pub green: bool,
}
