//! greencheck_ingest library: consumes legacy greencheck result messages.
//!
//! Each message is a PHP-serialized `{"result": SitecheckResult}` payload. The
//! library decodes it, extracts the check fields by their mangled private
//! property names, and records the check: one row in the append-only
//! `greencheck` log per accepted message, plus a refresh of the `greendomain`
//! cache for green checks by a known hosting provider.
//!
//! # Example
//!
//! ```no_run
//! use greencheck_ingest::{run_ingest, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     input: std::path::PathBuf::from("spool/"),
//!     ..Default::default()
//! };
//!
//! let report = run_ingest(config).await?;
//! println!(
//!     "Processed {} messages: {} hosted, {} unhosted, {} rejected, {} failed",
//!     report.total_messages,
//!     report.logged_hosted,
//!     report.logged_unhosted,
//!     report.rejected,
//!     report.failed
//! );
//! # Ok(())
//! # }
//! ```
//!
//! Embedders that receive messages from their own transport use
//! [`Pipeline::process_message`] directly.
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

mod app;
pub mod config;
pub mod decode;
pub mod domain;
pub mod error_handling;
pub mod extract;
pub mod initialization;
pub mod input;
pub mod pipeline;
pub mod reconcile;
pub mod sitecheck;
pub mod storage;

// Re-export public API
pub use config::{Config, FailOn, LogFormat, LogLevel};
pub use domain::{ClassifyError, DomainClassifier, PublicSuffixClassifier};
pub use error_handling::{ProcessError, ProcessingStats};
pub use extract::FieldSchema;
pub use pipeline::{CheckReport, Outcome, Pipeline, ReportStatus};
pub use reconcile::CacheWrite;
pub use run::{evaluate_fail_on, run_ingest, IngestReport};
pub use sitecheck::SiteCheck;
pub use storage::{init_db_pool_with_path, run_migrations};

// Internal run module (drains the configured input through the pipeline)
mod run {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use log::{error, info};

    use crate::app::{log_progress, print_error_statistics, print_outcome_summary};
    use crate::config::{Config, FailOn, LOGGING_INTERVAL};
    use crate::domain::PublicSuffixClassifier;
    use crate::error_handling::ErrorType;
    use crate::initialization::init_schema;
    use crate::input::{list_inputs, read_message};
    use crate::pipeline::{Outcome, Pipeline};
    use crate::storage::{init_db_pool_with_path, run_migrations};

    /// Results of an ingest run.
    #[derive(Debug, Clone)]
    pub struct IngestReport {
        /// Number of messages that reached a terminal state
        pub total_messages: usize,
        /// Messages logged with a hosting provider
        pub logged_hosted: usize,
        /// Messages logged without a hosting provider
        pub logged_unhosted: usize,
        /// Messages whose url was not a domain or literal address
        pub rejected: usize,
        /// Messages dropped on read, decode, extraction, or storage errors
        pub failed: usize,
        /// Green domain rows created or updated
        pub cache_writes: usize,
        /// Path to the SQLite database
        pub db_path: PathBuf,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    impl IngestReport {
        /// Messages that did not end up in the log.
        pub fn unlogged(&self) -> usize {
            self.rejected + self.failed
        }
    }

    /// Processes every message of `config.input` into the database at
    /// `config.db_path`.
    ///
    /// Messages are handled one at a time in input order. A message that fails
    /// is logged and counted; it never stops the run.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated, the
    /// namespace is invalid, or the input path cannot be listed.
    pub async fn run_ingest(config: Config) -> Result<IngestReport> {
        let schema = init_schema(&config).context("Invalid property namespace")?;
        let pool = init_db_pool_with_path(&config.db_path)
            .await
            .context("Failed to initialize database pool")?;
        run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        let inputs = list_inputs(&config.input).await?;
        info!(
            "Ingesting {} message source{} from {}",
            inputs.len(),
            if inputs.len() == 1 { "" } else { "s" },
            config.input.display()
        );

        let pipeline = Pipeline::new(
            pool.clone(),
            PublicSuffixClassifier,
            schema,
            config.result_key.as_str(),
        );
        let stats = pipeline.stats();

        let start_time = std::time::Instant::now();
        let mut cache_writes = 0usize;

        for (index, input) in inputs.iter().enumerate() {
            match read_message(input).await {
                Ok(message) => {
                    let report = pipeline.process_message(&message).await;
                    if report.cache_write.is_some() {
                        cache_writes += 1;
                    }
                }
                Err(e) => {
                    error!("Dropped message from {}: {:#}", input, e);
                    stats.increment_error(ErrorType::MessageReadError);
                    stats.increment_outcome(Outcome::Dropped);
                }
            }

            if (index + 1) % LOGGING_INTERVAL == 0 {
                log_progress(start_time, index + 1);
            }
        }

        let elapsed_seconds = start_time.elapsed().as_secs_f64();
        print_error_statistics(stats);
        print_outcome_summary(stats, elapsed_seconds);
        pool.close().await;

        Ok(IngestReport {
            total_messages: stats.total_messages(),
            logged_hosted: stats.get_outcome_count(Outcome::LoggedHosted),
            logged_unhosted: stats.get_outcome_count(Outcome::LoggedUnhosted),
            rejected: stats.get_outcome_count(Outcome::Rejected),
            failed: stats.get_outcome_count(Outcome::Dropped),
            cache_writes,
            db_path: config.db_path,
            elapsed_seconds,
        })
    }

    /// Returns `true` when the run should exit with a failure code.
    ///
    /// Rejected and dropped messages both count as failures. An empty run
    /// never fails.
    pub fn evaluate_fail_on(report: &IngestReport, fail_on: FailOn, pct_threshold: u8) -> bool {
        let unlogged = report.unlogged();
        match fail_on {
            FailOn::Never => false,
            FailOn::AnyFailure => unlogged > 0,
            FailOn::PctGreaterThan => {
                if report.total_messages == 0 {
                    return false;
                }
                let pct = unlogged as f64 / report.total_messages as f64 * 100.0;
                pct > f64::from(pct_threshold)
            }
        }
    }
}
