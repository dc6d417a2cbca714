//! Record transformer: orchestrates address, variant, and meta decoding for
//! one raw order record.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use tracing::debug;

use woo2shop_model::{
    LineItem, MetaMappingTable, MigrationWarning, NormalizedAddress, RawOrderRecord,
    TransformedOrderRecord, WarningKind,
};

use crate::address::{normalize_address, normalize_phone};
use crate::assemble::assemble_line_items;
use crate::error::ValidationError;
use crate::meta::{expand_meta, parse_meta_pairs};
use crate::variants::decode_variants;

const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A successfully transformed record plus the recoverable conditions hit
/// along the way.
#[derive(Debug)]
pub struct TransformOutcome {
    pub record: TransformedOrderRecord,
    pub warnings: Vec<MigrationWarning>,
}

#[derive(Debug, Deserialize)]
struct BaseItemPayload {
    name: String,
    #[serde(default)]
    sku: String,
    #[serde(default)]
    quantity: Option<u32>,
    #[serde(default)]
    price: Option<f64>,
    #[serde(default)]
    total: Option<f64>,
}

/// Transform one raw order record into the target schema.
///
/// Unrecoverable conditions (missing mandatory scalars, an undecodable base
/// purchase payload) fail the record; address, variant, and meta issues
/// downgrade to warnings on a best-effort output record.
///
/// # Errors
///
/// Returns [`ValidationError`] on a record-level failure. The caller counts
/// the record as failed and continues the batch.
pub fn transform_record(
    raw: &RawOrderRecord,
    rules: &MetaMappingTable,
    strict_meta: bool,
) -> Result<TransformOutcome, ValidationError> {
    let order_number = raw.order_number.trim();
    if order_number.is_empty() {
        return Err(ValidationError::MissingField {
            field: "order_number",
        });
    }
    let email = raw.email.trim();
    if email.is_empty() {
        return Err(ValidationError::MissingField {
            field: "customer_email",
        });
    }

    let record_id = raw.record_id();
    let mut warnings = Vec::new();

    let base = decode_base_items(&raw.items)?;
    let (variant_items, variant_warnings) = decode_variants(&record_id, &raw.variations);
    warnings.extend(variant_warnings);

    let meta_pairs = parse_meta_pairs(&raw.meta);
    let (meta_items, meta_warnings) =
        expand_meta(&record_id, &meta_pairs, rules, &raw.scalars, strict_meta);
    warnings.extend(meta_warnings);

    let billing = match normalize_address(&raw.address, &raw.phone) {
        Ok(address) => address,
        Err(error) => {
            warnings.push(MigrationWarning::for_record(
                &record_id,
                WarningKind::MalformedAddress,
                error.to_string(),
            ));
            NormalizedAddress {
                phone: normalize_phone(&raw.phone),
                ..NormalizedAddress::default()
            }
        }
    };

    let created_at = match normalize_order_date(&raw.order_date) {
        Some(date) => date,
        None => {
            warnings.push(MigrationWarning::for_record(
                &record_id,
                WarningKind::UnparseableOrderDate,
                format!("order date {:?} passed through verbatim", raw.order_date),
            ));
            raw.order_date.trim().to_string()
        }
    };

    let completed = raw.status.trim().eq_ignore_ascii_case("completed");
    let currency = match raw.currency.trim() {
        "" => "USD".to_string(),
        currency => currency.to_string(),
    };

    let line_items = assemble_line_items(base, variant_items, meta_items);
    debug!(
        record_id = %record_id,
        line_items = line_items.len(),
        warnings = warnings.len(),
        "record transformed"
    );

    Ok(TransformOutcome {
        record: TransformedOrderRecord {
            name: format!("#{order_number}"),
            email: email.to_string(),
            financial_status: if completed { "paid" } else { "pending" }.to_string(),
            fulfillment_status: if completed { "fulfilled" } else { "unfulfilled" }.to_string(),
            currency,
            created_at,
            billing,
            line_items,
        },
        warnings,
    })
}

/// Decode the base purchase payload. An undecodable payload fails the record;
/// there is no per-entry recovery for base purchases.
fn decode_base_items(payload: &str) -> Result<Vec<LineItem>, ValidationError> {
    let payload = payload.trim();
    if payload.is_empty() {
        return Ok(Vec::new());
    }
    let entries: Vec<BaseItemPayload> = serde_json::from_str(payload)
        .map_err(|error| ValidationError::payload("items", error.to_string()))?;
    Ok(entries
        .into_iter()
        .map(|entry| {
            let quantity = entry.quantity.unwrap_or(1).max(1);
            // Woo exports carry either a unit price or a line total.
            let price = entry
                .price
                .unwrap_or_else(|| entry.total.unwrap_or(0.0) / f64::from(quantity));
            LineItem::new(entry.name.trim(), entry.sku.trim(), quantity, price)
        })
        .collect())
}

/// Normalize an order date to `YYYY-MM-DD HH:MM:SS`. Empty stays empty;
/// `None` means unparseable.
fn normalize_order_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(String::new());
    }
    for format in [CANONICAL_DATE_FORMAT, "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(datetime.format(CANONICAL_DATE_FORMAT).to_string());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0)?;
        return Some(midnight.format(CANONICAL_DATE_FORMAT).to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use woo2shop_model::MetaMappingRule;

    fn raw_record() -> RawOrderRecord {
        RawOrderRecord {
            row: 1,
            order_number: "1001".to_string(),
            email: "ada@example.com".to_string(),
            status: "completed".to_string(),
            currency: String::new(),
            order_date: "2024-03-01T09:30:00".to_string(),
            address: r#"{"first_name":"Ada","last_name":"Smith","address_1":"12 Main St","city":"Portland","country":"US"}"#
                .to_string(),
            phone: "503-555-0133".to_string(),
            items: r#"[{"name":"Cutting Board","sku":"BOARD-1","quantity":2,"total":50.0}]"#
                .to_string(),
            variations: String::new(),
            meta: "Accent Piece:Olive Wood".to_string(),
            scalars: BTreeMap::from([("accent_piece".to_string(), "15.00".to_string())]),
        }
    }

    fn rules() -> MetaMappingTable {
        [MetaMappingRule {
            meta_key: "Accent Piece".to_string(),
            name_prefix: String::new(),
            name_suffix: "Accent Piece".to_string(),
            sku_prefix: "accent-piece-".to_string(),
            price_field: "accent_piece".to_string(),
        }]
        .into_iter()
        .collect()
    }

    #[test]
    fn full_record_transforms() {
        let outcome = transform_record(&raw_record(), &rules(), false).expect("transforms");
        let record = &outcome.record;
        assert_eq!(record.name, "#1001");
        assert_eq!(record.financial_status, "paid");
        assert_eq!(record.fulfillment_status, "fulfilled");
        assert_eq!(record.currency, "USD");
        assert_eq!(record.created_at, "2024-03-01 09:30:00");
        assert_eq!(record.billing.name, "Ada Smith");
        assert_eq!(record.billing.phone, "+15035550133");
        assert_eq!(record.line_items.len(), 2);
        // Base purchase first: unit price derived from total / quantity.
        assert_eq!(record.line_items[0].sku, "BOARD-1");
        assert_eq!(record.line_items[0].price, 25.0);
        assert_eq!(record.line_items[0].position, 1);
        // Then the synthetic meta item.
        assert_eq!(record.line_items[1].name, "Olive Wood Accent Piece");
        assert_eq!(record.line_items[1].sku, "accent-piece-olive-wood");
        assert_eq!(record.line_items[1].price, 15.0);
        assert_eq!(record.line_items[1].position, 2);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn missing_email_fails_record() {
        let mut raw = raw_record();
        raw.email = "  ".to_string();
        let error = transform_record(&raw, &rules(), false).expect_err("must fail");
        assert!(matches!(
            error,
            ValidationError::MissingField {
                field: "customer_email"
            }
        ));
    }

    #[test]
    fn malformed_items_payload_fails_record() {
        let mut raw = raw_record();
        raw.items = "{broken".to_string();
        assert!(transform_record(&raw, &rules(), false).is_err());
    }

    #[test]
    fn malformed_address_downgrades_to_warning() {
        let mut raw = raw_record();
        raw.address = "not json".to_string();
        let outcome = transform_record(&raw, &rules(), false).expect("best-effort record");
        assert!(
            outcome
                .warnings
                .iter()
                .any(|w| w.kind == WarningKind::MalformedAddress)
        );
        assert_eq!(outcome.record.billing.street, "");
        // Phone still normalized independently of the address payload.
        assert_eq!(outcome.record.billing.phone, "+15035550133");
    }

    #[test]
    fn transform_is_deterministic() {
        let raw = raw_record();
        let first = transform_record(&raw, &rules(), false).expect("first");
        let second = transform_record(&raw, &rules(), false).expect("second");
        assert_eq!(first.record, second.record);
        assert_eq!(first.warnings, second.warnings);
    }

    #[test]
    fn pending_status_and_date_passthrough() {
        let mut raw = raw_record();
        raw.status = "processing".to_string();
        raw.order_date = "March 1st".to_string();
        let outcome = transform_record(&raw, &rules(), false).expect("transforms");
        assert_eq!(outcome.record.financial_status, "pending");
        assert_eq!(outcome.record.fulfillment_status, "unfulfilled");
        assert_eq!(outcome.record.created_at, "March 1st");
        assert!(
            outcome
                .warnings
                .iter()
                .any(|w| w.kind == WarningKind::UnparseableOrderDate)
        );
    }

    #[test]
    fn date_only_gets_midnight() {
        assert_eq!(
            normalize_order_date("2024-03-01").as_deref(),
            Some("2024-03-01 00:00:00")
        );
    }
}
