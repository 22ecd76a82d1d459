//! Message processing pipeline.
//!
//! Ties the stages together for one message:
//! raw bytes → decode → extract → normalize → classify and persist.
//!
//! [`Pipeline::process_message`] is the outermost per-message entry point and
//! never fails: every error is logged with enough context to replay the
//! message by hand, counted, and returned inside the [`CheckReport`].

mod report;

use std::sync::Arc;

use log::{error, warn};
use sqlx::SqlitePool;

use crate::config::MAX_RAW_PREVIEW_BYTES;
use crate::decode::decode_envelope;
use crate::domain::DomainClassifier;
use crate::error_handling::{ProcessError, ProcessingStats};
use crate::extract::{ExtractionContext, FieldSchema};
use crate::reconcile::Reconciler;
use crate::sitecheck::SiteCheck;

pub use report::{CheckReport, Outcome, ReportStatus};

/// Processes sitecheck messages one at a time.
pub struct Pipeline<C> {
    schema: FieldSchema,
    result_key: String,
    reconciler: Reconciler<C>,
    stats: Arc<ProcessingStats>,
}

impl<C: DomainClassifier> Pipeline<C> {
    pub fn new(
        pool: SqlitePool,
        classifier: C,
        schema: FieldSchema,
        result_key: impl Into<String>,
    ) -> Self {
        let stats = Arc::new(ProcessingStats::new());
        Self {
            schema,
            result_key: result_key.into(),
            reconciler: Reconciler::new(pool, classifier, Arc::clone(&stats)),
            stats,
        }
    }

    pub fn stats(&self) -> &Arc<ProcessingStats> {
        &self.stats
    }

    pub fn reconciler(&self) -> &Reconciler<C> {
        &self.reconciler
    }

    /// Decodes a message and builds its canonical record. Performs no I/O.
    pub fn normalize(&self, message: &[u8]) -> Result<SiteCheck, ProcessError> {
        let object = decode_envelope(message, &self.result_key)?;
        let fields = ExtractionContext::new(&self.schema, &object).extract_fields()?;
        Ok(SiteCheck::from_fields(fields)?)
    }

    /// Processes one message to a terminal state.
    pub async fn process_message(&self, message: &[u8]) -> CheckReport {
        let sitecheck = match self.normalize(message) {
            Ok(sitecheck) => sitecheck,
            Err(e) => return self.failure_report(message, None, e),
        };

        match self.reconciler.reconcile(&sitecheck).await {
            Ok(reconciled) => {
                self.stats.increment_outcome(reconciled.outcome);
                CheckReport {
                    status: ReportStatus::Ok,
                    outcome: reconciled.outcome,
                    sitecheck: Some(sitecheck),
                    log_id: Some(reconciled.log_id),
                    cache_write: reconciled.cache_write,
                    error: None,
                }
            }
            Err(e) => self.failure_report(message, Some(sitecheck), e),
        }
    }

    fn failure_report(
        &self,
        message: &[u8],
        sitecheck: Option<SiteCheck>,
        error: ProcessError,
    ) -> CheckReport {
        let outcome = match error {
            ProcessError::Classify(_) => Outcome::Rejected,
            _ => Outcome::Dropped,
        };
        self.stats.increment_outcome(outcome);
        self.stats.increment_error(error.error_type());

        let context = match &sitecheck {
            Some(check) => serde_json::to_string(check).unwrap_or_else(|_| format!("{check:?}")),
            None => raw_preview(message),
        };
        match outcome {
            Outcome::Rejected => warn!("Rejected sitecheck ({}). Sitecheck: {}", error, context),
            _ => error!("Dropped message ({}). Message: {}", error, context),
        }

        CheckReport {
            status: ReportStatus::Error,
            outcome,
            sitecheck,
            log_id: None,
            cache_write: None,
            error: Some(error),
        }
    }
}

/// Printable prefix of a raw message, with control bytes escaped.
fn raw_preview(message: &[u8]) -> String {
    let end = message.len().min(MAX_RAW_PREVIEW_BYTES);
    let mut preview: String = String::from_utf8_lossy(&message[..end])
        .escape_debug()
        .collect();
    if message.len() > end {
        preview.push_str(&format!("... ({} bytes total)", message.len()));
    }
    preview
}
