//! Subcommand implementations.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, info_span, warn};

use woo2shop_core::{BatchProcessor, MigrationContext};
use woo2shop_ingest::{CsvOrderSource, ShopifyCsvSink, load_meta_mapping};
use woo2shop_model::{
    MetaMappingTable, MigrationReport, MigrationWarning, ReportConfiguration, RunOptions,
    WarningKind,
};
use woo2shop_report::{ReportInput, build_report, write_report_json};

use crate::cli::OrdersArgs;

/// Everything the summary printer needs from one `orders` run.
#[derive(Debug)]
pub struct OrdersResult {
    pub report: MigrationReport,
    pub output: PathBuf,
    pub report_path: PathBuf,
}

/// Run the orders conversion end to end.
///
/// Per-record failures are absorbed into the report and do not fail the run;
/// only configuration problems (unreadable input, unwritable output) and sink
/// failures surface as errors.
///
/// # Errors
///
/// Returns an error when the input cannot be opened, the output or report
/// cannot be written, or the batch aborts on a sink failure.
pub fn run_orders(args: &OrdersArgs) -> Result<OrdersResult> {
    let span = info_span!("orders", input = %args.input.display());
    let _guard = span.enter();

    if args.product_mapping.is_some() {
        debug!("product mapping is not used by the orders converter; ignoring");
    }

    let (rules, run_warnings) = load_rules(args.meta_mapping.as_deref());
    let options = RunOptions::new()
        .with_batch_size(args.batch_size)
        .with_strict_meta(args.strict_meta);
    let context = MigrationContext::new(options)
        .with_rules(rules)
        .with_run_warnings(run_warnings);

    let mut source = CsvOrderSource::open(&args.input)
        .with_context(|| format!("open input {}", args.input.display()))?;
    let mut sink = ShopifyCsvSink::create(&args.output)
        .with_context(|| format!("create output {}", args.output.display()))?;

    let mut processor = BatchProcessor::new(&context);
    let outcome = processor
        .run(&mut source, &mut sink)
        .context("migration aborted")?;

    let configuration = ReportConfiguration {
        input_file: args.input.display().to_string(),
        output_file: args.output.display().to_string(),
        meta_mapping_file: args.meta_mapping.as_ref().map(|p| p.display().to_string()),
        batch_size: context.options.batch_size,
        strict_meta: context.options.strict_meta,
        rules: context.rules.rules().to_vec(),
    };
    let report = build_report(
        "orders",
        ReportInput {
            stats: outcome.stats,
            configuration,
            failures: outcome.failures,
            warnings: outcome.warnings,
        },
    );

    let report_path = args
        .report
        .clone()
        .unwrap_or_else(|| default_report_path(&args.output));
    write_report_json(&report_path, &report)?;
    info!(report = %report_path.display(), "report written");

    Ok(OrdersResult {
        report,
        output: args.output.clone(),
        report_path,
    })
}

/// A missing or unreadable rule file downgrades to an empty table plus a
/// run-level warning; the migration itself still runs.
fn load_rules(path: Option<&Path>) -> (MetaMappingTable, Vec<MigrationWarning>) {
    let Some(path) = path else {
        return (MetaMappingTable::new(), Vec::new());
    };
    match load_meta_mapping(path) {
        Ok(loaded) => loaded,
        Err(error) => {
            warn!(
                path = %path.display(),
                cause = %error,
                "meta mapping unavailable; continuing without rules"
            );
            let warning = MigrationWarning::run_level(
                WarningKind::RuleTableUnavailable,
                format!("{}: {error}", path.display()),
            );
            (MetaMappingTable::new(), vec![warning])
        }
    }
}

/// `shopify.csv` gets its report at `shopify.report.json`.
fn default_report_path(output: &Path) -> PathBuf {
    output.with_extension("report.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_lands_next_to_the_output() {
        assert_eq!(
            default_report_path(Path::new("out/shopify.csv")),
            PathBuf::from("out/shopify.report.json")
        );
        assert_eq!(
            default_report_path(Path::new("shopify")),
            PathBuf::from("shopify.report.json")
        );
    }

    #[test]
    fn missing_rule_file_downgrades_to_empty_table() {
        let (table, warnings) = load_rules(Some(Path::new("/no/such/meta_mapping.csv")));
        assert!(table.is_empty());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::RuleTableUnavailable);
        assert!(warnings[0].record_id.is_none());
    }

    #[test]
    fn absent_rule_file_is_not_a_warning() {
        let (table, warnings) = load_rules(None);
        assert!(table.is_empty());
        assert!(warnings.is_empty());
    }
}
