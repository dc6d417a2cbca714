//! Order record types on both sides of the migration.

use std::collections::BTreeMap;

/// Maximum number of variant option dimensions the Shopify import schema
/// carries per product. Dimensions beyond this are dropped with a warning.
pub const MAX_OPTION_DIMENSIONS: usize = 3;

/// One row of a WooCommerce order export, as read from disk.
///
/// Payload cells (`address`, `items`, `variations`, `meta`) are kept as raw
/// text here; decoding into validated shapes happens in the transformer so a
/// malformed payload fails that record, not the batch.
#[derive(Debug, Clone, PartialEq)]
pub struct RawOrderRecord {
    /// 1-based data row number in the source file.
    pub row: usize,
    pub order_number: String,
    pub email: String,
    pub status: String,
    pub currency: String,
    pub order_date: String,
    /// Billing address payload (JSON object blob).
    pub address: String,
    /// Raw billing phone string.
    pub phone: String,
    /// Base purchase payload (JSON array blob).
    pub items: String,
    /// Variant entry payload (JSON array blob).
    pub variations: String,
    /// Ordered `key:value` metadata pairs, pipe-delimited.
    pub meta: String,
    /// Every other source column, by header name. Meta rules resolve their
    /// `price_field` against this map.
    pub scalars: BTreeMap<String, String>,
}

impl RawOrderRecord {
    /// Identifier used in logs, warnings, and the report.
    #[must_use]
    pub fn record_id(&self) -> String {
        let trimmed = self.order_number.trim();
        if trimmed.is_empty() {
            format!("row {}", self.row)
        } else {
            trimmed.to_string()
        }
    }
}

/// Canonical billing address after decoding the source blob.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedAddress {
    pub name: String,
    pub company: String,
    pub street: String,
    pub address2: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
    pub country: String,
    /// International-format phone (`+` prefixed).
    pub phone: String,
}

/// One purchasable unit within an order: a base purchase, a decoded variant,
/// or a synthetic item produced by a meta mapping rule.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    /// 1-based slot index within the record, assigned by the assembler.
    pub position: u32,
    pub name: String,
    pub sku: String,
    pub quantity: u32,
    pub price: f64,
    /// Option values joined with " / " in dimension order; empty for
    /// non-variant items.
    pub variant_title: String,
    /// Option values in the record's retained dimension order. At most
    /// [`MAX_OPTION_DIMENSIONS`] entries; an empty string marks a dimension
    /// the variant does not carry.
    pub option_values: Vec<String>,
}

impl LineItem {
    /// A plain item with no variant dimensions and an unassigned position.
    #[must_use]
    pub fn new(name: impl Into<String>, sku: impl Into<String>, quantity: u32, price: f64) -> Self {
        Self {
            position: 0,
            name: name.into(),
            sku: sku.into(),
            quantity,
            price,
            variant_title: String::new(),
            option_values: Vec::new(),
        }
    }
}

/// Target-schema order row: Shopify scalar columns plus the ordered line-item
/// sequence that becomes the repeating column group on output.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformedOrderRecord {
    /// Shopify order name, `#<order_number>`.
    pub name: String,
    pub email: String,
    pub financial_status: String,
    pub fulfillment_status: String,
    pub currency: String,
    pub created_at: String,
    pub billing: NormalizedAddress,
    pub line_items: Vec<LineItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_prefers_order_number() {
        let mut record = RawOrderRecord {
            row: 7,
            order_number: " 1043 ".to_string(),
            email: String::new(),
            status: String::new(),
            currency: String::new(),
            order_date: String::new(),
            address: String::new(),
            phone: String::new(),
            items: String::new(),
            variations: String::new(),
            meta: String::new(),
            scalars: BTreeMap::new(),
        };
        assert_eq!(record.record_id(), "1043");
        record.order_number.clear();
        assert_eq!(record.record_id(), "row 7");
    }
}
