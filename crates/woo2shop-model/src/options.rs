//! Run options for the batch processor.

use serde::{Deserialize, Serialize};

/// Default number of transformed records buffered before a flush.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Value-level configuration for one migration run.
///
/// `batch_size` is a chunking policy for output buffering only; processing is
/// strictly sequential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOptions {
    pub batch_size: usize,
    /// Surface unmatched metadata keys as warnings instead of ignoring them.
    pub strict_meta: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            strict_meta: false,
        }
    }
}

impl RunOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    #[must_use]
    pub fn with_strict_meta(mut self, enable: bool) -> Self {
        self.strict_meta = enable;
        self
    }
}
