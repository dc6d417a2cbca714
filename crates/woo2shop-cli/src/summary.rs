//! End-of-run console summary tables.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use woo2shop_model::MigrationReport;

use crate::commands::OrdersResult;

pub fn print_summary(result: &OrdersResult) {
    println!("Output: {}", result.output.display());
    println!("Report: {}", result.report_path.display());

    let stats = &result.report.statistics;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Total records"), Cell::new(stats.total)]);
    table.add_row(vec![
        Cell::new("Successful"),
        count_cell(stats.successful, Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Failed"),
        count_cell(stats.failed, Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("Warnings"),
        count_cell(stats.warnings, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Success rate"),
        Cell::new(&result.report.success_rate).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    print_failures(&result.report);
    print_warnings(&result.report);
}

fn print_failures(report: &MigrationReport) {
    if report.failures.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Record"), header_cell("Cause")]);
    apply_table_style(&mut table);
    for failure in &report.failures {
        table.add_row(vec![
            Cell::new(&failure.record_id).fg(Color::Red),
            Cell::new(&failure.message),
        ]);
    }
    println!();
    println!("Failures:");
    println!("{table}");
}

fn print_warnings(report: &MigrationReport) {
    if report.warnings.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Record"),
        header_cell("Kind"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    for warning in &report.warnings {
        let record = match &warning.record_id {
            Some(id) => Cell::new(id),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            record,
            Cell::new(warning.kind.as_str()).fg(Color::Yellow),
            Cell::new(&warning.message),
        ]);
    }
    println!();
    println!("Warnings:");
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(value: usize, color: Color) -> Cell {
    if value > 0 {
        Cell::new(value).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(value)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
