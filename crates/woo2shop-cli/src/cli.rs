//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

use woo2shop_model::DEFAULT_BATCH_SIZE;

#[derive(Parser)]
#[command(
    name = "woo2shop",
    version,
    about = "WooCommerce to Shopify migration toolkit",
    long_about = "Convert WooCommerce export CSVs to Shopify import format.\n\n\
                  Per-record failures are isolated and reported; a run that\n\
                  completes exits 0 even when individual records failed."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log output format (pretty for humans, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Explicit log level; overrides -v/-q when both are given.
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Append logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert a WooCommerce order export to a Shopify order import CSV.
    Orders(OrdersArgs),
}

#[derive(Parser)]
pub struct OrdersArgs {
    /// Path to the WooCommerce order export CSV.
    #[arg(short = 'i', long = "input", value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the generated Shopify import CSV.
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: PathBuf,

    /// Meta mapping rule file (CSV). Without it, no synthetic line items are
    /// produced from metadata.
    #[arg(long = "meta-mapping", value_name = "PATH")]
    pub meta_mapping: Option<PathBuf>,

    /// Accepted for parity with the sibling converters; the orders converter
    /// does not use a product mapping.
    #[arg(long = "product-mapping", value_name = "PATH")]
    pub product_mapping: Option<PathBuf>,

    /// Records buffered before an output flush. Chunking only; processing is
    /// always sequential.
    #[arg(long = "batch-size", value_name = "N", default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Warn about metadata keys that match no rule.
    #[arg(long = "strict-meta")]
    pub strict_meta: bool,

    /// Report artifact path (default: next to the output file).
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}
