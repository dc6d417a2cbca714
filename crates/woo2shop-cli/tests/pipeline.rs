//! End-to-end tests for the orders command.

use std::fs;
use std::path::{Path, PathBuf};

use woo2shop_cli::cli::OrdersArgs;
use woo2shop_cli::commands::run_orders;

const INPUT_HEADER: [&str; 11] = [
    "order_number",
    "customer_email",
    "status",
    "order_currency",
    "order_date",
    "billing_address",
    "billing_phone",
    "items",
    "variations",
    "meta",
    "accent_piece",
];

const BILLING: &str = r#"{"first_name":"Ada","last_name":"Smith","address_1":"12 Main St","city":"Portland","state":"OR","postcode":"97201","country":"US"}"#;
const ITEMS: &str = r#"[{"name":"Cutting Board","sku":"BOARD-1","quantity":1,"price":25.0}]"#;

fn write_input(dir: &Path, rows: &[[&str; 11]]) -> PathBuf {
    let path = dir.join("orders.csv");
    let mut writer = csv::Writer::from_path(&path).expect("create input");
    writer.write_record(INPUT_HEADER).expect("header");
    for row in rows {
        writer.write_record(row).expect("row");
    }
    writer.flush().expect("flush input");
    path
}

fn write_rules(dir: &Path) -> PathBuf {
    let path = dir.join("meta_mapping.csv");
    fs::write(
        &path,
        "meta_key,name_prefix,name_suffix,sku_prefix,price_field\n\
         Accent Piece,,Accent Piece,accent-piece-,accent_piece\n",
    )
    .expect("write rules");
    path
}

fn args(input: PathBuf, output: PathBuf, meta_mapping: Option<PathBuf>) -> OrdersArgs {
    OrdersArgs {
        input,
        output,
        meta_mapping,
        product_mapping: None,
        batch_size: 100,
        strict_meta: false,
        report: None,
    }
}

#[test]
fn converts_orders_and_writes_report() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_input(
        dir.path(),
        &[
            [
                "1001",
                "ada@example.com",
                "completed",
                "USD",
                "2024-01-05 10:00:00",
                BILLING,
                "503-555-0133",
                ITEMS,
                "",
                "Accent Piece:Olive Wood",
                "15.00",
            ],
            // Missing email fails this record alone.
            [
                "1002", "", "completed", "USD", "2024-01-05 11:00:00", "", "", "", "", "", "",
            ],
        ],
    );
    let rules = write_rules(dir.path());
    let output = dir.path().join("shopify.csv");

    let result = run_orders(&args(input, output.clone(), Some(rules))).expect("run succeeds");
    assert_eq!(result.report.statistics.total, 2);
    assert_eq!(result.report.statistics.successful, 1);
    assert_eq!(result.report.statistics.failed, 1);
    assert_eq!(result.report.success_rate, "50.00%");
    assert_eq!(result.report.failures.len(), 1);
    assert_eq!(result.report.failures[0].record_id, "1002");

    let mut reader = csv::Reader::from_path(&output).expect("open output");
    let headers = reader.headers().expect("headers").clone();
    // One base item plus one meta-expanded item: two line-item slots.
    assert_eq!(headers.len(), 15 + 2 * 5);
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.expect("row")).collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][0], "#1001");
    assert_eq!(&rows[0][1], "ada@example.com");
    assert_eq!(&rows[0][2], "paid");
    assert_eq!(&rows[0][3], "fulfilled");
    assert_eq!(&rows[0][6], "Ada Smith");
    assert_eq!(&rows[0][14], "+15035550133");
    assert_eq!(&rows[0][15], "Cutting Board");
    assert_eq!(&rows[0][17], "25.00");
    assert_eq!(&rows[0][20], "Olive Wood Accent Piece");
    assert_eq!(&rows[0][17 + 5], "15.00");
    assert_eq!(&rows[0][18 + 5], "accent-piece-olive-wood");

    // The report artifact lands next to the output by default.
    assert_eq!(result.report_path, dir.path().join("shopify.report.json"));
    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&result.report_path).expect("read report"))
            .expect("valid json");
    assert_eq!(report["tool"], "orders");
    assert_eq!(report["statistics"]["failed"], 1);
    assert_eq!(report["configuration"]["batch_size"], 100);
}

#[test]
fn unreadable_rule_file_degrades_to_a_run_warning() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_input(
        dir.path(),
        &[[
            "1001",
            "ada@example.com",
            "processing",
            "",
            "",
            "",
            "",
            "",
            "",
            "Accent Piece:Olive Wood",
            "",
        ]],
    );
    let output = dir.path().join("shopify.csv");
    let missing_rules = dir.path().join("no-such-rules.csv");

    let result = run_orders(&args(input, output, Some(missing_rules))).expect("run succeeds");
    assert_eq!(result.report.statistics.total, 1);
    assert_eq!(result.report.statistics.successful, 1);
    assert!(
        result
            .report
            .warnings
            .iter()
            .any(|w| w.record_id.is_none() && w.message.contains("no-such-rules.csv"))
    );
    // Without rules the metadata expands to nothing.
    assert!(result.report.configuration.rules.is_empty());
}

#[test]
fn missing_input_is_a_configuration_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let error = run_orders(&args(
        dir.path().join("no-such-orders.csv"),
        dir.path().join("shopify.csv"),
        None,
    ))
    .expect_err("must fail");
    assert!(format!("{error:#}").contains("no-such-orders.csv"));
}

#[test]
fn custom_report_path_is_honored() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_input(
        dir.path(),
        &[[
            "1001",
            "ada@example.com",
            "completed",
            "EUR",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
        ]],
    );
    let report_path = dir.path().join("run.json");
    let mut orders = args(input, dir.path().join("shopify.csv"), None);
    orders.report = Some(report_path.clone());

    let result = run_orders(&orders).expect("run succeeds");
    assert_eq!(result.report_path, report_path);
    assert!(report_path.is_file());
}
