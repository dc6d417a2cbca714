pub mod options;
pub mod order;
pub mod report;
pub mod rules;
pub mod stats;
pub mod warning;

pub use options::{DEFAULT_BATCH_SIZE, RunOptions};
pub use order::{
    LineItem, MAX_OPTION_DIMENSIONS, NormalizedAddress, RawOrderRecord, TransformedOrderRecord,
};
pub use report::{MigrationReport, RecordFailure, ReportConfiguration};
pub use rules::{MetaMappingRule, MetaMappingTable};
pub use stats::MigrationStats;
pub use warning::{MigrationWarning, WarningKind};
