//! Meta rule engine: converts matching metadata key/value pairs into
//! synthetic line items using the loaded rule table.

use std::collections::BTreeMap;

use woo2shop_model::{LineItem, MetaMappingTable, MigrationWarning, WarningKind};

use crate::text::{collapse_whitespace, slugify};

/// Parse the ordered pipe-delimited `key:value` metadata cell.
///
/// Each segment may carry the WooCommerce `meta:` tag; segments without a
/// separator are ignored.
#[must_use]
pub fn parse_meta_pairs(raw: &str) -> Vec<(String, String)> {
    raw.split('|')
        .filter_map(|segment| {
            let segment = segment.trim();
            let segment = segment.strip_prefix("meta:").unwrap_or(segment);
            let (key, value) = segment.split_once(':')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            Some((key.to_string(), value.trim().to_string()))
        })
        .collect()
}

/// Expand metadata pairs into synthetic line items.
///
/// Emission follows rule-table order; pairs matching the same rule keep their
/// source order. Keys with no rule are ignored unless `strict` is set, except
/// `pa_`-prefixed variant attributes and `_`-prefixed internal keys, which
/// are never warned about.
#[must_use]
pub fn expand_meta(
    record_id: &str,
    pairs: &[(String, String)],
    rules: &MetaMappingTable,
    scalars: &BTreeMap<String, String>,
    strict: bool,
) -> (Vec<LineItem>, Vec<MigrationWarning>) {
    let mut warnings = Vec::new();
    let mut matched: Vec<(usize, LineItem)> = Vec::new();

    for (key, value) in pairs {
        if key.starts_with("pa_") || key.starts_with('_') {
            continue;
        }
        let Some((rule_position, rule)) = rules.get(key) else {
            if strict {
                warnings.push(MigrationWarning::for_record(
                    record_id,
                    WarningKind::UnmatchedMetaKey,
                    format!("metadata key {key:?} matched no rule"),
                ));
            }
            continue;
        };

        let name = meta_item_name(&rule.name_prefix, value, &rule.name_suffix);
        let sku = slugify(&format!("{}{}", rule.sku_prefix, value));
        let price = match lookup_price(scalars, &rule.price_field) {
            Some(price) => price,
            None => {
                let cause = if !rule.price_field.is_empty() && scalars.contains_key(&rule.price_field)
                {
                    "is not a number"
                } else {
                    "is absent"
                };
                warnings.push(MigrationWarning::for_record(
                    record_id,
                    WarningKind::MissingMetaPrice,
                    format!(
                        "price field {:?} {cause} for key {key:?}; defaulting to 0",
                        rule.price_field
                    ),
                ));
                0.0
            }
        };
        matched.push((rule_position, LineItem::new(name, sku, 1, price)));
    }

    // Stable sort keeps source order for pairs that share a rule.
    matched.sort_by_key(|(rule_position, _)| *rule_position);
    let items = matched.into_iter().map(|(_, item)| item).collect();
    (items, warnings)
}

/// Trimmed, whitespace-collapsed concatenation of prefix, value, and suffix.
fn meta_item_name(prefix: &str, value: &str, suffix: &str) -> String {
    collapse_whitespace(&format!("{prefix} {value} {suffix}"))
}

fn lookup_price(scalars: &BTreeMap<String, String>, price_field: &str) -> Option<f64> {
    if price_field.is_empty() {
        return None;
    }
    scalars.get(price_field)?.trim().parse::<f64>().ok()
}
