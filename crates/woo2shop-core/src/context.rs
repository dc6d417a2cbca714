//! Explicit run context passed into the batch processor and its
//! collaborators. Replaces any process-wide statistics or logging singleton.

use woo2shop_model::{MetaMappingTable, MigrationWarning, RunOptions};

/// Immutable-after-setup context for one migration run: active options, the
/// loaded rule table, and any run-level configuration warnings collected
/// before processing started.
#[derive(Debug, Clone, Default)]
pub struct MigrationContext {
    pub options: RunOptions,
    pub rules: MetaMappingTable,
    pub run_warnings: Vec<MigrationWarning>,
}

impl MigrationContext {
    #[must_use]
    pub fn new(options: RunOptions) -> Self {
        Self {
            options,
            rules: MetaMappingTable::new(),
            run_warnings: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_rules(mut self, rules: MetaMappingTable) -> Self {
        self.rules = rules;
        self
    }

    #[must_use]
    pub fn with_run_warnings(mut self, warnings: Vec<MigrationWarning>) -> Self {
        self.run_warnings = warnings;
        self
    }
}
