//! Sequential reader over a WooCommerce order export CSV.

use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::debug;

use woo2shop_core::{RecordSource, SourceRecordError};
use woo2shop_model::RawOrderRecord;

use crate::error::IngestError;

/// Source columns with dedicated fields on [`RawOrderRecord`]. Everything
/// else lands in the scalars map.
const PAYLOAD_COLUMNS: [&str; 10] = [
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
];

#[derive(Debug)]
struct ColumnMap {
    order_number: usize,
    email: usize,
    status: Option<usize>,
    currency: Option<usize>,
    order_date: Option<usize>,
    address: Option<usize>,
    phone: Option<usize>,
    items: Option<usize>,
    variations: Option<usize>,
    meta: Option<usize>,
}

/// CSV-backed [`RecordSource`]. A row that cannot be decoded yields a
/// per-record error and iteration continues; only a missing file or a
/// missing mandatory column fails at open time.
#[derive(Debug)]
pub struct CsvOrderSource {
    reader: csv::Reader<File>,
    headers: Vec<String>,
    columns: ColumnMap,
    row: usize,
}

impl CsvOrderSource {
    /// Open an order export for sequential reading.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError`] when the file is unreadable or the header
    /// lacks `order_number` or `customer_email`.
    pub fn open(path: &Path) -> Result<Self, IngestError> {
        let file = File::open(path).map_err(|e| IngestError::io(path, e))?;
        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(file);
        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| IngestError::csv(path, e.to_string()))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let find = |name: &str| headers.iter().position(|h| h == name);
        let columns = ColumnMap {
            order_number: find("order_number").ok_or(missing(path, "order_number"))?,
            email: find("customer_email").ok_or(missing(path, "customer_email"))?,
            status: find("status"),
            currency: find("order_currency"),
            order_date: find("order_date"),
            address: find("billing_address"),
            phone: find("billing_phone"),
            items: find("items"),
            variations: find("variations"),
            meta: find("meta"),
        };

        debug!(path = %path.display(), columns = headers.len(), "order export opened");
        Ok(Self {
            reader,
            headers,
            columns,
            row: 0,
        })
    }

    fn build_record(&self, record: &csv::StringRecord) -> RawOrderRecord {
        let field = |idx: Option<usize>| -> String {
            idx.and_then(|i| record.get(i))
                .map(str::trim)
                .unwrap_or_default()
                .to_string()
        };

        let mut scalars = std::collections::BTreeMap::new();
        for (index, header) in self.headers.iter().enumerate() {
            if PAYLOAD_COLUMNS.contains(&header.as_str()) {
                continue;
            }
            let value = record.get(index).map(str::trim).unwrap_or_default();
            if !value.is_empty() {
                scalars.insert(header.clone(), value.to_string());
            }
        }

        RawOrderRecord {
            row: self.row,
            order_number: field(Some(self.columns.order_number)),
            email: field(Some(self.columns.email)),
            status: field(self.columns.status),
            currency: field(self.columns.currency),
            order_date: field(self.columns.order_date),
            address: field(self.columns.address),
            phone: field(self.columns.phone),
            items: field(self.columns.items),
            variations: field(self.columns.variations),
            meta: field(self.columns.meta),
            scalars,
        }
    }
}

impl RecordSource for CsvOrderSource {
    fn next_record(&mut self) -> Option<Result<RawOrderRecord, SourceRecordError>> {
        self.row += 1;
        let mut record = csv::StringRecord::new();
        match self.reader.read_record(&mut record) {
            Ok(false) => None,
            Ok(true) => Some(Ok(self.build_record(&record))),
            Err(error) => Some(Err(SourceRecordError {
                record_id: format!("row {}", self.row),
                message: error.to_string(),
            })),
        }
    }
}

fn missing(path: &Path, column: &'static str) -> IngestError {
    IngestError::MissingColumn {
        path: PathBuf::from(path),
        column,
    }
}
