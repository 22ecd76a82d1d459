//! Persistence of a sitecheck into the greencheck log and green domain cache.
//!
//! For every check the reconciler:
//! 1. Resolves the hosting provider (an unknown or absent id leaves it unresolved)
//! 2. Refreshes the green domain cache, only when the check is green *and*
//!    the provider resolved (a "hosted" check)
//! 3. Classifies the url's top-level domain; a url that is neither a domain nor
//!    a literal address is rejected here and nothing is logged
//! 4. Appends exactly one greencheck log row: hosted checks carry provider,
//!    IP range, and match type with `green = "yes"`; every other check is
//!    logged with `green = "no"` and no provider columns
//!
//! The cache is never touched by grey checks, so a url that once showed green
//! keeps its cache row after later grey checks.

use std::sync::Arc;

use log::{debug, info};
use sqlx::SqlitePool;

use crate::domain::DomainClassifier;
use crate::error_handling::{DatabaseError, InfoType, ProcessError, ProcessingStats};
use crate::pipeline::Outcome;
use crate::sitecheck::SiteCheck;
use crate::storage::{
    find_green_domain, find_provider, insert_greencheck, upsert_green_domain, GreenDomain,
    GreenFlag, HostingProvider, NewGreencheck,
};

/// What the cache-update step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheWrite {
    Created,
    Updated,
}

/// Result of a check that made it into the log.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled {
    /// `LoggedHosted` or `LoggedUnhosted`
    pub outcome: Outcome,
    pub log_id: i64,
    pub tld: String,
    pub cache_write: Option<CacheWrite>,
}

/// Writes checks to storage.
pub struct Reconciler<C> {
    pool: SqlitePool,
    classifier: C,
    stats: Arc<ProcessingStats>,
}

impl<C: DomainClassifier> Reconciler<C> {
    pub fn new(pool: SqlitePool, classifier: C, stats: Arc<ProcessingStats>) -> Self {
        Self {
            pool,
            classifier,
            stats,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Runs one check through lookup, cache update, classification, and logging.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::Classify` when the url is rejected (no log row is
    /// written) and `ProcessError::Database` when a read or write fails.
    pub async fn reconcile(&self, check: &SiteCheck) -> Result<Reconciled, ProcessError> {
        debug!("Reconciling {:?}", check);

        let provider = match check.hosting_provider_id {
            Some(id) => {
                let provider = find_provider(&self.pool, id).await?;
                if provider.is_none() {
                    debug!("Hosting provider {} not found for {}", id, check.url);
                    self.stats.increment_info(InfoType::ProviderNotFound);
                }
                provider
            }
            None => None,
        };

        // Only a green check with a known provider counts as hosted
        let hosted_by = provider.as_ref().filter(|_| check.is_green);

        let cache_write = match hosted_by {
            Some(provider) => Some(self.update_green_domain(check, provider).await?),
            None => None,
        };

        // The caller reports the rejection
        let tld = self.classifier.classify(&check.url).inspect_err(|e| {
            debug!("Not logging {}: {}", check.url, e);
        })?;

        let row = match hosted_by {
            Some(provider) => NewGreencheck {
                hosting_provider_id: Some(provider.id),
                ip_range_id: check.match_ip_range_id,
                date: &check.checked_at,
                green: GreenFlag::Yes,
                ip: &check.ip,
                tld: &tld,
                match_type: check.match_type.as_deref(),
                url: &check.url,
            },
            None => NewGreencheck {
                hosting_provider_id: None,
                ip_range_id: None,
                date: &check.checked_at,
                green: GreenFlag::No,
                ip: &check.ip,
                tld: &tld,
                match_type: None,
                url: &check.url,
            },
        };
        let log_id = insert_greencheck(&self.pool, &row).await?;
        info!(
            "Greencheck logged: id={} url={} green={}",
            log_id,
            check.url,
            row.green.as_ref()
        );

        let outcome = if hosted_by.is_some() {
            Outcome::LoggedHosted
        } else {
            Outcome::LoggedUnhosted
        };
        Ok(Reconciled {
            outcome,
            log_id,
            tld,
            cache_write,
        })
    }

    /// Creates or overwrites the cache row for `check.url` from the provider.
    ///
    /// Lookup and write are separate statements, so two workers handling the
    /// same url can interleave; the upsert makes the last write win.
    pub async fn update_green_domain(
        &self,
        check: &SiteCheck,
        provider: &HostingProvider,
    ) -> Result<CacheWrite, DatabaseError> {
        let existing = find_green_domain(&self.pool, &check.url).await?;
        let domain = GreenDomain {
            url: check.url.clone(),
            hosted_by: provider.name.clone(),
            hosted_by_id: check.hosting_provider_id,
            hosted_by_website: provider.website.clone(),
            partner: provider.partner.clone(),
            modified: check.checked_at.clone(),
            green: check.is_green,
        };
        upsert_green_domain(&self.pool, &domain).await?;

        let write = if existing.is_some() {
            self.stats.increment_info(InfoType::GreenDomainUpdated);
            CacheWrite::Updated
        } else {
            self.stats.increment_info(InfoType::GreenDomainCreated);
            CacheWrite::Created
        };
        debug!("Green domain {:?} for {}", write, check.url);
        Ok(write)
    }
}
