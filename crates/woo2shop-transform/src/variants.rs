//! Variant decoding: expands embedded variant-attribute payloads into ordered
//! option dimensions and per-variant line items.

use serde::Deserialize;

use woo2shop_model::{LineItem, MAX_OPTION_DIMENSIONS, MigrationWarning, WarningKind};

use crate::text::title_case;

#[derive(Debug, Deserialize)]
struct VariantEntryPayload {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    sku: Option<String>,
    #[serde(default)]
    price: Option<f64>,
    #[serde(default)]
    quantity: Option<u32>,
    #[serde(default)]
    attributes: Vec<AttributePayload>,
}

#[derive(Debug, Deserialize)]
struct AttributePayload {
    name: String,
    value: String,
}

struct DecodedEntry {
    name: Option<String>,
    sku: String,
    price: f64,
    quantity: u32,
    attributes: Vec<(String, String)>,
}

/// Decode the variant payload of one record into line items.
///
/// Attribute names are deduplicated in first-seen order across all entries
/// and capped at [`MAX_OPTION_DIMENSIONS`] retained dimensions; overflow
/// dimensions are dropped with a single warning for the record. A malformed
/// entry (undecodable, or missing its SKU) is skipped with a warning while
/// the remaining entries still produce items.
#[must_use]
pub fn decode_variants(record_id: &str, payload: &str) -> (Vec<LineItem>, Vec<MigrationWarning>) {
    let payload = payload.trim();
    if payload.is_empty() {
        return (Vec::new(), Vec::new());
    }

    let mut warnings = Vec::new();
    let values: Vec<serde_json::Value> = match serde_json::from_str(payload) {
        Ok(values) => values,
        Err(error) => {
            warnings.push(MigrationWarning::for_record(
                record_id,
                WarningKind::MalformedVariantEntry,
                format!("variations payload is not a JSON array: {error}"),
            ));
            return (Vec::new(), warnings);
        }
    };

    let mut entries = Vec::new();
    for (index, value) in values.into_iter().enumerate() {
        let entry: VariantEntryPayload = match serde_json::from_value(value) {
            Ok(entry) => entry,
            Err(error) => {
                warnings.push(MigrationWarning::for_record(
                    record_id,
                    WarningKind::MalformedVariantEntry,
                    format!("variant entry {} skipped: {error}", index + 1),
                ));
                continue;
            }
        };
        let sku = entry.sku.as_deref().unwrap_or("").trim().to_string();
        if sku.is_empty() {
            warnings.push(MigrationWarning::for_record(
                record_id,
                WarningKind::MalformedVariantEntry,
                format!("variant entry {} skipped: missing sku", index + 1),
            ));
            continue;
        }
        let attributes = entry
            .attributes
            .iter()
            .map(|attribute| {
                (
                    clean_attribute_name(&attribute.name),
                    attribute.value.trim().to_string(),
                )
            })
            .collect();
        entries.push(DecodedEntry {
            name: entry.name,
            sku,
            price: entry.price.unwrap_or(0.0),
            quantity: entry.quantity.unwrap_or(1).max(1),
            attributes,
        });
    }

    // Dimension names in first-seen order across all retained entries.
    let mut dimensions: Vec<String> = Vec::new();
    for entry in &entries {
        for (name, _) in &entry.attributes {
            if !dimensions.iter().any(|existing| existing == name) {
                dimensions.push(name.clone());
            }
        }
    }
    if dimensions.len() > MAX_OPTION_DIMENSIONS {
        let dropped = dimensions.split_off(MAX_OPTION_DIMENSIONS);
        warnings.push(MigrationWarning::for_record(
            record_id,
            WarningKind::VariantDimensionOverflow,
            format!(
                "more than {MAX_OPTION_DIMENSIONS} variant dimensions; dropped: {}",
                dropped.join(", ")
            ),
        ));
    }

    let items = entries
        .into_iter()
        .map(|entry| {
            let option_values: Vec<String> = dimensions
                .iter()
                .map(|dimension| {
                    entry
                        .attributes
                        .iter()
                        .find(|(name, _)| name == dimension)
                        .map(|(_, value)| value.clone())
                        .unwrap_or_default()
                })
                .collect();
            let variant_title = option_values
                .iter()
                .filter(|value| !value.is_empty())
                .cloned()
                .collect::<Vec<_>>()
                .join(" / ");
            let name = entry
                .name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| {
                    if variant_title.is_empty() {
                        entry.sku.clone()
                    } else {
                        variant_title.clone()
                    }
                });
            let mut item = LineItem::new(name, entry.sku, entry.quantity, entry.price);
            item.variant_title = variant_title;
            item.option_values = option_values;
            item
        })
        .collect();

    (items, warnings)
}

/// Strip WooCommerce attribute prefixes and present the name in title case.
fn clean_attribute_name(name: &str) -> String {
    let stripped = name
        .strip_prefix("attribute_pa_")
        .or_else(|| name.strip_prefix("attribute_"))
        .or_else(|| name.strip_prefix("pa_"))
        .unwrap_or(name);
    title_case(&stripped.replace(['_', '-'], " "))
}
