//! Batch processor: drives the record stream through the transformer,
//! isolating per-record failures and accumulating statistics.

use thiserror::Error;
use tracing::{debug, error, info, warn};

use woo2shop_model::{MigrationStats, MigrationWarning, RecordFailure, TransformedOrderRecord};
use woo2shop_transform::transform_record;

use crate::context::MigrationContext;
use crate::io::{DynError, RecordSink, RecordSource, SinkSummary};

/// Lifecycle of one batch run.
///
/// `Init -> Processing -> Finalizing -> Done`, with `Processing -> Aborted`
/// (or `Finalizing -> Aborted`) only on a fatal sink failure. Output
/// resources are owned by the sink and released when it is dropped, so every
/// exit path, including Aborted, closes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    Init,
    Processing,
    Finalizing,
    Done,
    Aborted,
}

/// Fatal batch failure. Per-record conditions never surface here.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("output write failed: {source}")]
    Sink {
        #[source]
        source: DynError,
    },
}

/// Result of a completed batch. `stats.successful + stats.failed ==
/// stats.total` holds; warnings include run-level configuration warnings.
#[derive(Debug)]
pub struct BatchOutcome {
    pub stats: MigrationStats,
    pub warnings: Vec<MigrationWarning>,
    pub failures: Vec<RecordFailure>,
    pub sink: SinkSummary,
}

/// Sequential batch processor. Exclusively owns and mutates the run's
/// [`MigrationStats`]; `batch_size` controls output chunking only.
pub struct BatchProcessor<'a> {
    context: &'a MigrationContext,
    state: BatchState,
    stats: MigrationStats,
}

impl<'a> BatchProcessor<'a> {
    #[must_use]
    pub fn new(context: &'a MigrationContext) -> Self {
        Self {
            context,
            state: BatchState::Init,
            stats: MigrationStats::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> BatchState {
        self.state
    }

    /// Process every record from `source` into `sink`.
    ///
    /// Record-level failures are logged with the record identifier and
    /// collected; processing continues. A sink failure aborts the run:
    /// already-flushed output is retained but no outcome is produced.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError`] only for fatal sink failures.
    pub fn run(
        &mut self,
        source: &mut dyn RecordSource,
        sink: &mut dyn RecordSink,
    ) -> Result<BatchOutcome, BatchError> {
        self.state = BatchState::Processing;

        let mut warnings = self.context.run_warnings.clone();
        self.stats.add_run_warnings(warnings.len());
        let mut failures: Vec<RecordFailure> = Vec::new();
        let mut buffer: Vec<TransformedOrderRecord> = Vec::new();
        let batch_size = self.context.options.batch_size.max(1);

        while let Some(next) = source.next_record() {
            self.stats.record_seen();
            let raw = match next {
                Ok(raw) => raw,
                Err(source_error) => {
                    self.stats.record_failure();
                    error!(
                        record_id = %source_error.record_id,
                        cause = %source_error.message,
                        "record unreadable"
                    );
                    failures.push(RecordFailure {
                        record_id: source_error.record_id,
                        message: source_error.message,
                    });
                    continue;
                }
            };

            let record_id = raw.record_id();
            match transform_record(&raw, &self.context.rules, self.context.options.strict_meta) {
                Ok(outcome) => {
                    for warning in &outcome.warnings {
                        warn!(record_id = %record_id, "{warning}");
                    }
                    self.stats.record_success(outcome.warnings.len());
                    warnings.extend(outcome.warnings);
                    buffer.push(outcome.record);
                    if buffer.len() >= batch_size {
                        self.flush(sink, &mut buffer)?;
                    }
                }
                Err(validation_error) => {
                    self.stats.record_failure();
                    error!(record_id = %record_id, cause = %validation_error, "record failed");
                    failures.push(RecordFailure {
                        record_id,
                        message: validation_error.to_string(),
                    });
                }
            }
        }

        self.state = BatchState::Finalizing;
        self.flush(sink, &mut buffer)?;
        let summary = match sink.finish() {
            Ok(summary) => summary,
            Err(source) => {
                self.state = BatchState::Aborted;
                return Err(BatchError::Sink { source });
            }
        };

        self.state = BatchState::Done;
        debug_assert_eq!(self.stats.successful + self.stats.failed, self.stats.total);
        info!(
            total = self.stats.total,
            successful = self.stats.successful,
            failed = self.stats.failed,
            warnings = self.stats.warnings,
            records_written = summary.records_written,
            "batch complete"
        );
        Ok(BatchOutcome {
            stats: self.stats,
            warnings,
            failures,
            sink: summary,
        })
    }

    fn flush(
        &mut self,
        sink: &mut dyn RecordSink,
        buffer: &mut Vec<TransformedOrderRecord>,
    ) -> Result<(), BatchError> {
        if buffer.is_empty() {
            return Ok(());
        }
        let chunk = std::mem::take(buffer);
        debug!(records = chunk.len(), "flushing output chunk");
        if let Err(source) = sink.stage(chunk) {
            self.state = BatchState::Aborted;
            return Err(BatchError::Sink { source });
        }
        Ok(())
    }
}
