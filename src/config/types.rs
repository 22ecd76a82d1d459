//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::ValueEnum;

use crate::config::constants::{DB_PATH, DEFAULT_NAMESPACE, DEFAULT_RESULT_KEY};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Exit-code policy applied after a run.
///
/// Dropped messages are always logged; this only decides whether the process
/// reports failure to whatever launched it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FailOn {
    /// Always exit 0 once the run completes
    Never,
    /// Exit non-zero if any message was rejected or dropped
    AnyFailure,
    /// Exit non-zero if the failure percentage exceeds the threshold
    PctGreaterThan,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use greencheck_ingest::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     input: PathBuf::from("spool/"),
///     db_path: PathBuf::from("./greencheck.db"),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Message file, directory of message files, or `-` for stdin
    pub input: PathBuf,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Database path (SQLite file)
    pub db_path: PathBuf,

    /// Class namespace used to mangle private property names
    pub namespace: String,

    /// Top-level key holding the result object
    pub result_key: String,

    /// Exit-code policy
    pub fail_on: FailOn,

    /// Failure percentage threshold for `FailOn::PctGreaterThan`
    pub fail_on_pct_threshold: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from("-"),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            db_path: PathBuf::from(DB_PATH),
            namespace: DEFAULT_NAMESPACE.to_string(),
            result_key: DEFAULT_RESULT_KEY.to_string(),
            fail_on: FailOn::Never,
            fail_on_pct_threshold: 10,
        }
    }
}
