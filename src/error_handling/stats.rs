//! Processing statistics tracking.
//!
//! This module provides thread-safe counters for message outcomes, errors,
//! and informational metrics during ingestion.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::{ErrorType, InfoType};
use crate::pipeline::Outcome;

/// Thread-safe processing statistics tracker.
///
/// Every counter is created at zero on construction, so increments never
/// need to allocate. Share across tasks with `Arc`.
pub struct ProcessingStats {
    outcomes: HashMap<Outcome, AtomicUsize>,
    errors: HashMap<ErrorType, AtomicUsize>,
    info: HashMap<InfoType, AtomicUsize>,
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStats {
    pub fn new() -> Self {
        ProcessingStats {
            outcomes: Outcome::iter().map(|o| (o, AtomicUsize::new(0))).collect(),
            errors: ErrorType::iter().map(|e| (e, AtomicUsize::new(0))).collect(),
            info: InfoType::iter().map(|i| (i, AtomicUsize::new(0))).collect(),
        }
    }

    pub fn increment_outcome(&self, outcome: Outcome) {
        if let Some(counter) = self.outcomes.get(&outcome) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment outcome counter for {:?} which is not in the map.",
                outcome
            );
        }
    }

    pub fn increment_error(&self, error: ErrorType) {
        if let Some(counter) = self.errors.get(&error) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment error counter for {:?} which is not in the map.",
                error
            );
        }
    }

    pub fn increment_info(&self, info_type: InfoType) {
        if let Some(counter) = self.info.get(&info_type) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment info counter for {:?} which is not in the map.",
                info_type
            );
        }
    }

    pub fn get_outcome_count(&self, outcome: Outcome) -> usize {
        self.outcomes
            .get(&outcome)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    pub fn get_error_count(&self, error: ErrorType) -> usize {
        self.errors
            .get(&error)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    pub fn get_info_count(&self, info_type: InfoType) -> usize {
        self.info
            .get(&info_type)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Number of messages that reached any terminal state.
    pub fn total_messages(&self) -> usize {
        Outcome::iter().map(|o| self.get_outcome_count(o)).sum()
    }

    pub fn total_errors(&self) -> usize {
        ErrorType::iter().map(|e| self.get_error_count(e)).sum()
    }

    pub fn total_info(&self) -> usize {
        InfoType::iter().map(|i| self.get_info_count(i)).sum()
    }
}
