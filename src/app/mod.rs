//! Run-level reporting used by the ingest loop: progress lines and the
//! end-of-run statistics breakdown.

pub mod logging;
pub mod statistics;

// Re-export public API
pub use logging::log_progress;
pub use statistics::{print_error_statistics, print_outcome_summary};
