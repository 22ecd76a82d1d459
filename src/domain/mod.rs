//! Top-level domain classification.
//!
//! This module maps a checked URL to the public suffix it is registered
//! under (e.g. `org` for `https://www.example.org/`, `co.uk` for
//! `shop.example.co.uk`) using the Public Suffix List.
//!
//! Key items:
//! - `DomainClassifier` - The classification seam used by the reconciler
//! - `PublicSuffixClassifier` - The default, offline implementation

use std::borrow::Cow;
use std::net::IpAddr;

use psl::{List, Psl};
use thiserror::Error;
use url::{Host, Url};

/// Reasons a URL could not be classified.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassifyError {
    /// The URL is neither a domain with a known public suffix nor a literal address.
    #[error("not a domain or an IP address: {0}")]
    NotADomain(String),

    /// The lookup itself failed.
    #[error("domain lookup failed: {0}")]
    Transient(String),
}

/// Classifies a URL into its top-level domain label.
///
/// Implementations return the empty label for literal IP addresses.
pub trait DomainClassifier: Send + Sync {
    fn classify(&self, url: &str) -> Result<String, ClassifyError>;
}

/// Classifier backed by the compiled-in Public Suffix List.
#[derive(Debug, Clone, Copy, Default)]
pub struct PublicSuffixClassifier;

impl PublicSuffixClassifier {
    /// Public suffix of `host`, if the host is a registrable domain under a
    /// known suffix.
    fn suffix_of(&self, host: &str) -> Option<String> {
        let host = host.trim_end_matches('.').to_ascii_lowercase();
        let domain = List.domain(host.as_bytes())?;
        let suffix = domain.suffix();
        if !suffix.is_known() {
            return None;
        }
        std::str::from_utf8(suffix.as_bytes())
            .ok()
            .map(str::to_owned)
    }
}

impl DomainClassifier for PublicSuffixClassifier {
    fn classify(&self, url: &str) -> Result<String, ClassifyError> {
        let trimmed = url.trim();
        if trimmed.parse::<IpAddr>().is_ok() {
            return Ok(String::new());
        }

        // Bare hostnames are common in checks; give them a scheme so they parse
        let candidate = if trimmed.contains("://") {
            Cow::Borrowed(trimmed)
        } else {
            Cow::Owned(format!("http://{trimmed}"))
        };
        let not_a_domain = || ClassifyError::NotADomain(url.to_string());
        let parsed = Url::parse(&candidate).map_err(|_| not_a_domain())?;

        match parsed.host() {
            Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => Ok(String::new()),
            Some(Host::Domain(host)) => self.suffix_of(host).ok_or_else(not_a_domain),
            None => Err(not_a_domain()),
        }
    }
}
