//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions and categorization
//! - Processing statistics tracking (outcomes, errors, info metrics)
//!
//! Every per-message failure is a [`ProcessError`]; its [`ErrorType`] is the
//! category it is counted and reported under.

mod stats;
mod types;

// Re-export public API
pub use stats::ProcessingStats;
pub use types::{DatabaseError, ErrorType, InfoType, InitializationError, ProcessError};
