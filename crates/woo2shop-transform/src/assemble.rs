//! Line item assembly: merge base, variant, and meta items into one ordered,
//! indexed sequence.

use woo2shop_model::LineItem;

/// Merge line items in base → variant → meta order, each group preserving its
/// internal order, and assign 1-based contiguous positions.
///
/// Pure; malformed inputs have already been filtered by the producers.
#[must_use]
pub fn assemble_line_items(
    base: Vec<LineItem>,
    variants: Vec<LineItem>,
    meta: Vec<LineItem>,
) -> Vec<LineItem> {
    let mut items = base;
    items.extend(variants);
    items.extend(meta);
    for (index, item) in items.iter_mut().enumerate() {
        item.position = (index + 1) as u32;
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(sku: &str) -> LineItem {
        LineItem::new(sku, sku, 1, 0.0)
    }

    #[test]
    fn order_and_indices() {
        let items = assemble_line_items(
            vec![item("base-1"), item("base-2")],
            vec![item("variant-1")],
            vec![item("meta-1")],
        );
        let skus: Vec<&str> = items.iter().map(|i| i.sku.as_str()).collect();
        assert_eq!(skus, vec!["base-1", "base-2", "variant-1", "meta-1"]);
        let positions: Vec<u32> = items.iter().map(|i| i.position).collect();
        assert_eq!(positions, vec![1, 2, 3, 4]);
    }

    #[test]
    fn empty_groups_are_fine() {
        assert!(assemble_line_items(Vec::new(), Vec::new(), Vec::new()).is_empty());
        let items = assemble_line_items(Vec::new(), Vec::new(), vec![item("meta-1")]);
        assert_eq!(items[0].position, 1);
    }
}
