//! Logger setup for the ingest worker.
//!
//! Every dropped or rejected message is logged with its payload, so the log
//! stream is the place operators replay failures from. The JSON format emits
//! one object per line for log shippers.

use std::io::Write;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::LevelFilter;

/// Installs the global logger.
///
/// `RUST_LOG` is read first; `level` then overrides the crate's own filter,
/// and `sqlx` statement logging is held at `Info`.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// # Use RUST_LOG for quick debugging (no CLI args needed)
/// RUST_LOG=debug greencheck_ingest messages/
///
/// # Override with CLI args (takes precedence)
/// RUST_LOG=debug greencheck_ingest messages/ --log-level info
///
/// # Per-module filtering via RUST_LOG
/// RUST_LOG=greencheck_ingest=debug,sqlx=warn greencheck_ingest messages/
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    colored::control::set_override(true);

    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    builder.filter_module("sqlx", LevelFilter::Info);
    builder.filter_module("greencheck_ingest", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                let line = serde_json::json!({
                    "ts": chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
                    "level": record.level().as_str(),
                    "target": record.target(),
                    "msg": record.args().to_string(),
                });
                writeln!(buf, "{line}")
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let level = record.level();
                let colored_level = match level {
                    log::Level::Error => level.as_str().red().bold(),
                    log::Level::Warn => level.as_str().yellow(),
                    log::Level::Info => level.as_str().green(),
                    log::Level::Debug => level.as_str().blue(),
                    log::Level::Trace => level.as_str().purple(),
                };

                writeln!(
                    buf,
                    "{} {} [{}] {}",
                    chrono::Local::now().format("%H:%M:%S%.3f").to_string().dimmed(),
                    record.target().cyan(),
                    colored_level,
                    record.args()
                )
            });
        }
    }

    // try_init so a second call (tests, embedding) is an error, not a panic
    builder.try_init()?;

    Ok(())
}
