//! Progress logging utilities.

use log::info;

/// Logs how many messages have been handled and the running rate.
pub fn log_progress(start_time: std::time::Instant, processed: usize) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let rate = if elapsed_secs > 0.0 {
        processed as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Processed {} messages in {:.2} seconds (~{:.2} messages/sec)",
        processed, elapsed_secs, rate
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_progress_at_start() {
        // Zero elapsed time must not divide by zero
        log_progress(std::time::Instant::now(), 0);
        log_progress(std::time::Instant::now(), 25);
    }
}
