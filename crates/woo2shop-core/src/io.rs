//! Record source and sink seams.
//!
//! The batch processor only sees these traits; the CSV loader/writer in the
//! ingest crate implements them, and the sibling converters reuse the same
//! contracts with their own record shapes wrapped into the order model.

use std::error::Error;
use std::fmt;

use woo2shop_model::{RawOrderRecord, TransformedOrderRecord};

/// Transport error type for source/sink implementations.
pub type DynError = Box<dyn Error + Send + Sync + 'static>;

/// A source row that could not be decoded into a raw record. This is a
/// per-record condition: the source keeps yielding subsequent rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRecordError {
    /// Best-available identifier for the failed row (e.g. `row 12`).
    pub record_id: String,
    pub message: String,
}

impl fmt::Display for SourceRecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.record_id, self.message)
    }
}

impl Error for SourceRecordError {}

/// Sequential reader over raw order records.
pub trait RecordSource {
    /// Next record, `None` at end of input. A `Err` item is a single
    /// undecodable row; iteration continues past it.
    fn next_record(&mut self) -> Option<Result<RawOrderRecord, SourceRecordError>>;
}

/// What a sink reports after a successful finish.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SinkSummary {
    /// Records physically written.
    pub records_written: usize,
    /// Width of the repeating line-item column group.
    pub line_item_slots: usize,
}

/// Sequential, append-only writer for transformed records.
///
/// Implementations may stage rows internally (the CSV writer does, so the
/// repeating column group can use the batch-wide maximum width) and perform
/// the physical write in [`RecordSink::finish`]. Any error from either
/// method is fatal to the batch.
pub trait RecordSink {
    fn stage(&mut self, batch: Vec<TransformedOrderRecord>) -> Result<(), DynError>;

    /// Write staged rows and release output resources.
    fn finish(&mut self) -> Result<SinkSummary, DynError>;
}
