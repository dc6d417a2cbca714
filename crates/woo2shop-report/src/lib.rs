//! Report builder: renders the immutable end-of-run [`MigrationReport`] from
//! accumulated statistics and the run configuration, and writes the JSON
//! artifact.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, SecondsFormat};

use woo2shop_model::{
    MigrationReport, MigrationStats, MigrationWarning, RecordFailure, ReportConfiguration,
};

/// Inputs for one report. Taken once, after the batch reaches Finalizing.
#[derive(Debug)]
pub struct ReportInput {
    pub stats: MigrationStats,
    pub configuration: ReportConfiguration,
    pub failures: Vec<RecordFailure>,
    pub warnings: Vec<MigrationWarning>,
}

/// Build the report snapshot. Called exactly once per run, never mid-batch.
#[must_use]
pub fn build_report(tool: &str, input: ReportInput) -> MigrationReport {
    build_report_at(
        tool,
        input,
        Local::now().to_rfc3339_opts(SecondsFormat::Secs, false),
    )
}

fn build_report_at(tool: &str, input: ReportInput, timestamp: String) -> MigrationReport {
    MigrationReport {
        timestamp,
        tool: tool.to_string(),
        success_rate: format_success_rate(&input.stats),
        statistics: input.stats,
        configuration: input.configuration,
        failures: input.failures,
        warnings: input.warnings,
    }
}

/// `successful / total` as a percentage with two decimal digits; `0.00%` for
/// an empty batch.
#[must_use]
pub fn format_success_rate(stats: &MigrationStats) -> String {
    format!("{:.2}%", stats.success_rate())
}

/// Write the report artifact as pretty-printed JSON.
///
/// # Errors
///
/// Fails when the report cannot be serialized or the file cannot be written.
pub fn write_report_json(path: &Path, report: &MigrationReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("serialize report")?;
    std::fs::write(path, json).with_context(|| format!("write report {}", path.display()))?;
    Ok(())
}
