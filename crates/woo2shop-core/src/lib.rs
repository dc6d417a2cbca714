//! Batch processing engine for the WooCommerce to Shopify migration toolkit.
//!
//! The batch processor and the [`RecordSource`]/[`RecordSink`] contracts here
//! are shared infrastructure: the sibling converters (products, customers,
//! collections, reviews, discounts) drive the same loop with their own
//! sources and sinks.

pub mod batch;
pub mod context;
pub mod io;

pub use batch::{BatchError, BatchOutcome, BatchProcessor, BatchState};
pub use context::MigrationContext;
pub use io::{DynError, RecordSink, RecordSource, SinkSummary, SourceRecordError};
