//! Shopify import CSV writer.
//!
//! Rows carry fixed scalar columns followed by a repeating line-item column
//! group. The group width is the batch-wide maximum line-item count, so rows
//! are staged in memory and physically written when the batch finalizes;
//! shorter records pad the trailing group columns with empty strings.

use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::info;

use woo2shop_core::{DynError, RecordSink, SinkSummary};
use woo2shop_model::{LineItem, TransformedOrderRecord};

use crate::error::IngestError;

const SCALAR_HEADERS: [&str; 15] = [
    "Name",
    "Email",
    "Financial Status",
    "Fulfillment Status",
    "Currency",
    "Created at",
    "Billing Name",
    "Billing Street",
    "Billing Address2",
    "Billing Company",
    "Billing City",
    "Billing Province",
    "Billing Zip",
    "Billing Country",
    "Billing Phone",
];

const GROUP_HEADERS: [&str; 5] = [
    "Lineitem name",
    "Lineitem quantity",
    "Lineitem price",
    "Lineitem sku",
    "Lineitem variant title",
];

/// CSV-backed [`RecordSink`]. The destination file is created up front so an
/// unwritable output fails before any record is processed.
#[derive(Debug)]
pub struct ShopifyCsvSink {
    path: PathBuf,
    file: Option<File>,
    staged: Vec<TransformedOrderRecord>,
}

impl ShopifyCsvSink {
    /// # Errors
    ///
    /// Returns [`IngestError`] when the destination cannot be created.
    pub fn create(path: &Path) -> Result<Self, IngestError> {
        let file = File::create(path).map_err(|e| IngestError::io(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            file: Some(file),
            staged: Vec::new(),
        })
    }
}

impl RecordSink for ShopifyCsvSink {
    fn stage(&mut self, batch: Vec<TransformedOrderRecord>) -> Result<(), DynError> {
        if self.file.is_none() {
            return Err("sink already finished".into());
        }
        self.staged.extend(batch);
        Ok(())
    }

    fn finish(&mut self) -> Result<SinkSummary, DynError> {
        let file = self.file.take().ok_or("sink already finished")?;
        let slots = self
            .staged
            .iter()
            .map(|record| record.line_items.len())
            .max()
            .unwrap_or(0);

        let mut writer = csv::Writer::from_writer(file);
        let mut header: Vec<String> = SCALAR_HEADERS.iter().map(|&h| h.to_string()).collect();
        for _ in 0..slots {
            header.extend(GROUP_HEADERS.iter().map(|&h| h.to_string()));
        }
        writer.write_record(&header)?;

        for record in &self.staged {
            writer.write_record(record_row(record, slots))?;
        }
        writer.flush()?;

        let summary = SinkSummary {
            records_written: self.staged.len(),
            line_item_slots: slots,
        };
        info!(
            path = %self.path.display(),
            records = summary.records_written,
            line_item_slots = summary.line_item_slots,
            "output written"
        );
        Ok(summary)
    }
}

fn record_row(record: &TransformedOrderRecord, slots: usize) -> Vec<String> {
    let billing = &record.billing;
    let mut row = vec![
        record.name.clone(),
        record.email.clone(),
        record.financial_status.clone(),
        record.fulfillment_status.clone(),
        record.currency.clone(),
        record.created_at.clone(),
        billing.name.clone(),
        billing.street.clone(),
        billing.address2.clone(),
        billing.company.clone(),
        billing.city.clone(),
        billing.province.clone(),
        billing.postal_code.clone(),
        billing.country.clone(),
        billing.phone.clone(),
    ];
    for slot in 0..slots {
        match record.line_items.get(slot) {
            Some(item) => row.extend(item_cells(item)),
            None => row.extend(std::iter::repeat_n(String::new(), GROUP_HEADERS.len())),
        }
    }
    row
}

fn item_cells(item: &LineItem) -> [String; 5] {
    [
        item.name.clone(),
        item.quantity.to_string(),
        format_amount(item.price),
        item.sku.clone(),
        item.variant_title.clone(),
    ]
}

/// Money formatting with two decimal places.
fn format_amount(value: f64) -> String {
    format!("{value:.2}")
}
