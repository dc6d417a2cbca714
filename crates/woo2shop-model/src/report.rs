//! Report types: the immutable end-of-run snapshot of a batch's outcome.

use serde::{Deserialize, Serialize};

use crate::rules::MetaMappingRule;
use crate::stats::MigrationStats;
use crate::warning::MigrationWarning;

/// One record-level failure, attributed to its source record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFailure {
    pub record_id: String,
    pub message: String,
}

/// Copy of the active configuration taken at run start.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportConfiguration {
    pub input_file: String,
    pub output_file: String,
    pub meta_mapping_file: Option<String>,
    pub batch_size: usize,
    pub strict_meta: bool,
    pub rules: Vec<MetaMappingRule>,
}

/// Final structured summary of a migration run. Built exactly once, after the
/// batch reaches Finalizing; never mid-batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MigrationReport {
    /// Time-zone-qualified (RFC 3339) build time.
    pub timestamp: String,
    pub tool: String,
    pub statistics: MigrationStats,
    /// `successful / total` as a percentage with two decimals, e.g. "98.04%".
    pub success_rate: String,
    pub configuration: ReportConfiguration,
    pub failures: Vec<RecordFailure>,
    pub warnings: Vec<MigrationWarning>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_round_trips_through_json() {
        let report = MigrationReport {
            timestamp: "2026-08-30T12:00:00+02:00".to_string(),
            tool: "orders".to_string(),
            statistics: MigrationStats {
                total: 2,
                successful: 1,
                failed: 1,
                warnings: 1,
            },
            success_rate: "50.00%".to_string(),
            configuration: ReportConfiguration {
                input_file: "orders.csv".to_string(),
                output_file: "shopify.csv".to_string(),
                meta_mapping_file: None,
                batch_size: 100,
                strict_meta: false,
                rules: Vec::new(),
            },
            failures: vec![RecordFailure {
                record_id: "1001".to_string(),
                message: "missing mandatory field: customer_email".to_string(),
            }],
            warnings: Vec::new(),
        };
        let json = serde_json::to_string(&report).expect("serialize report");
        let round: MigrationReport = serde_json::from_str(&json).expect("deserialize report");
        assert_eq!(round, report);
    }
}
