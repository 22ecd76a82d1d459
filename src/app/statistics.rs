//! End-of-run statistics.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorType, InfoType, ProcessingStats};
use crate::pipeline::Outcome;

/// Logs the one-line summary of a finished run.
pub fn print_outcome_summary(stats: &ProcessingStats, elapsed_seconds: f64) {
    let total = stats.total_messages();
    info!(
        "✅ Processed {} message{} in {:.1}s: {} hosted, {} unhosted, {} rejected, {} dropped",
        total,
        if total == 1 { "" } else { "s" },
        elapsed_seconds,
        stats.get_outcome_count(Outcome::LoggedHosted),
        stats.get_outcome_count(Outcome::LoggedUnhosted),
        stats.get_outcome_count(Outcome::Rejected),
        stats.get_outcome_count(Outcome::Dropped),
    );
}

/// Prints error and info counts to the log, skipping zero counters.
pub fn print_error_statistics(stats: &ProcessingStats) {
    let total_errors = stats.total_errors();
    let total_info = stats.total_info();

    if total_errors > 0 {
        info!("Error Counts ({} total):", total_errors);
        for error_type in ErrorType::iter() {
            let count = stats.get_error_count(error_type);
            if count > 0 {
                info!("   {}: {}", error_type.as_str(), count);
            }
        }
    }

    if total_info > 0 {
        info!("Info Counts ({} total):", total_info);
        for info_type in InfoType::iter() {
            let count = stats.get_info_count(info_type);
            if count > 0 {
                info!("   {}: {}", info_type.as_str(), count);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_error_statistics_no_errors() {
        let stats = ProcessingStats::new();
        print_error_statistics(&stats);
    }

    #[test]
    fn test_print_error_statistics_with_errors_and_info() {
        let stats = ProcessingStats::new();
        stats.increment_error(ErrorType::DecodeError);
        stats.increment_error(ErrorType::ClassificationRejected);
        stats.increment_info(InfoType::GreenDomainCreated);
        print_error_statistics(&stats);
    }

    #[test]
    fn test_print_outcome_summary() {
        let stats = ProcessingStats::new();
        print_outcome_summary(&stats, 0.0);
        stats.increment_outcome(Outcome::LoggedHosted);
        print_outcome_summary(&stats, 1.25);
    }
}
