//! Per-message outcome reports.

use strum_macros::EnumIter;

use crate::error_handling::ProcessError;
use crate::reconcile::CacheWrite;
use crate::sitecheck::SiteCheck;

/// Terminal state of one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Outcome {
    /// Logged with its hosting provider (`green = "yes"`)
    LoggedHosted,
    /// Logged without a provider (`green = "no"`)
    LoggedUnhosted,
    /// The url is not a domain or literal address, or classification failed
    Rejected,
    /// Decoding, extraction, or storage failed
    Dropped,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::LoggedHosted => "Logged (hosted)",
            Outcome::LoggedUnhosted => "Logged (unhosted)",
            Outcome::Rejected => "Rejected",
            Outcome::Dropped => "Dropped",
        }
    }
}

/// Whether a message ended in the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStatus {
    Ok,
    Error,
}

/// Outcome of one message, handed back to whatever drives consumption.
#[derive(Debug)]
pub struct CheckReport {
    pub status: ReportStatus,
    pub outcome: Outcome,
    /// The normalized record, when decoding got that far
    pub sitecheck: Option<SiteCheck>,
    /// Id of the appended greencheck row
    pub log_id: Option<i64>,
    pub cache_write: Option<CacheWrite>,
    pub error: Option<ProcessError>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.status == ReportStatus::Ok
    }
}
