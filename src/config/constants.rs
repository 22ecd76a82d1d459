//! Configuration constants.
//!
//! This module defines the constants used throughout the application,
//! including legacy message layout, decoder limits, and logging cadence.

/// Default SQLite database path.
pub const DB_PATH: &str = "./greencheck.db";

// Legacy message layout
/// Class namespace used to mangle the private properties of a sitecheck result.
///
/// The checker publishes `TGWF\Greencheck\SitecheckResult` objects, whose private
/// properties are serialized as `"\0TGWF\Greencheck\SitecheckResult\0<name>"`.
pub const DEFAULT_NAMESPACE: &str = "TGWF\\Greencheck\\SitecheckResult";
/// Top-level key holding the sitecheck result object.
pub const DEFAULT_RESULT_KEY: &str = "result";

// Decoder limits
/// Maximum nesting depth accepted by the decoder.
/// Real messages nest three levels deep (envelope, result, DateTime); anything
/// past this is rejected before it can exhaust the stack.
pub const MAX_DECODE_DEPTH: usize = 64;

// Logging
/// Log a progress line after this many messages.
pub const LOGGING_INTERVAL: usize = 100;
/// Maximum number of raw message bytes echoed into the log for a dropped message.
pub const MAX_RAW_PREVIEW_BYTES: usize = 512;

/// Canonical text format of a check timestamp.
pub const CHECKED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
