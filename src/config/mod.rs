//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (legacy message layout, limits, etc.)
//! - Library configuration and CLI option types

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, FailOn, LogFormat, LogLevel};
