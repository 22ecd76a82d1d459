//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `greencheck_ingest` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Exit codes
//!
//! All core functionality is implemented in the library crate.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use greencheck_ingest::config::{DB_PATH, DEFAULT_NAMESPACE, DEFAULT_RESULT_KEY};
use greencheck_ingest::initialization::init_logger_with;
use greencheck_ingest::{evaluate_fail_on, run_ingest, Config, FailOn, LogFormat, LogLevel};

/// Records legacy greencheck result messages in the greencheck database.
#[derive(Debug, Parser)]
#[command(name = "greencheck_ingest", version, about)]
struct Cli {
    /// Message file, directory of message files (one message per file), or `-` for stdin
    input: PathBuf,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    log_format: LogFormat,

    /// SQLite database path
    #[arg(long, env = "GREENCHECK_DB_PATH", default_value = DB_PATH)]
    db_path: PathBuf,

    /// Class namespace of the private result properties
    #[arg(long, default_value = DEFAULT_NAMESPACE)]
    namespace: String,

    /// Top-level key holding the result object
    #[arg(long, default_value = DEFAULT_RESULT_KEY)]
    result_key: String,

    /// Exit-code policy for rejected or dropped messages
    #[arg(long, value_enum, default_value_t = FailOn::Never)]
    fail_on: FailOn,

    /// Failure percentage above which `--fail-on pct-greater-than` exits non-zero
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u8).range(0..=100))]
    fail_on_pct_threshold: u8,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            input: cli.input,
            log_level: cli.log_level,
            log_format: cli.log_format,
            db_path: cli.db_path,
            namespace: cli.namespace,
            result_key: cli.result_key,
            fail_on: cli.fail_on,
            fail_on_pct_threshold: cli.fail_on_pct_threshold,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; anything it sets becomes a default for `env` args
    let _ = dotenvy::dotenv();

    let config = Config::from(Cli::parse());

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    let fail_on = config.fail_on;
    let pct_threshold = config.fail_on_pct_threshold;

    match run_ingest(config).await {
        Ok(report) => {
            println!(
                "✅ Processed {} message{} ({} hosted, {} unhosted, {} rejected, {} failed) in {:.1}s",
                report.total_messages,
                if report.total_messages == 1 { "" } else { "s" },
                report.logged_hosted,
                report.logged_unhosted,
                report.rejected,
                report.failed,
                report.elapsed_seconds
            );
            println!(
                "{} green domain write{} saved in {}",
                report.cache_writes,
                if report.cache_writes == 1 { "" } else { "s" },
                report.db_path.display()
            );
            if evaluate_fail_on(&report, fail_on, pct_threshold) {
                eprintln!(
                    "greencheck_ingest: {} of {} messages were not logged (policy: {:?})",
                    report.unlogged(),
                    report.total_messages,
                    fail_on
                );
                process::exit(2);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("greencheck_ingest error: {:#}", e);
            process::exit(1);
        }
    }
}
