//! Batch counters. Owned and mutated exclusively by the batch processor.

use serde::{Deserialize, Serialize};

/// Running counters for one migration batch.
///
/// `successful + failed == total` holds for any completed run; warnings are
/// independent and may exceed one per record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationStats {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub warnings: usize,
}

impl MigrationStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a record entering processing.
    pub fn record_seen(&mut self) {
        self.total += 1;
    }

    pub fn record_success(&mut self, warning_count: usize) {
        self.successful += 1;
        self.warnings += warning_count;
    }

    pub fn record_failure(&mut self) {
        self.failed += 1;
    }

    pub fn add_run_warnings(&mut self, count: usize) {
        self.warnings += count;
    }

    /// Success rate in percent, 0.0 for an empty batch.
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.successful as f64 / self.total as f64 * 100.0
        }
    }
}
