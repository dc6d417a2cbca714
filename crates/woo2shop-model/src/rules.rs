//! Meta mapping rules: configuration describing how one metadata key becomes
//! a synthetic line item.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One row of the meta mapping table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaMappingRule {
    pub meta_key: String,
    pub name_prefix: String,
    pub name_suffix: String,
    pub sku_prefix: String,
    /// Name of the raw-record scalar column holding the item price.
    pub price_field: String,
}

/// Ordered, immutable rule table keyed by exact `meta_key`.
///
/// Insertion order is preserved because synthetic line items are emitted in
/// rule-table order. Duplicate keys keep the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetaMappingTable {
    rules: Vec<MetaMappingRule>,
    #[serde(skip)]
    index: BTreeMap<String, usize>,
}

impl MetaMappingTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a rule, keeping the first occurrence on duplicate keys.
    /// Returns false when the key was already present.
    pub fn insert(&mut self, rule: MetaMappingRule) -> bool {
        if self.index.contains_key(&rule.meta_key) {
            return false;
        }
        self.index.insert(rule.meta_key.clone(), self.rules.len());
        self.rules.push(rule);
        true
    }

    /// Exact-match lookup, returning the rule and its table position.
    #[must_use]
    pub fn get(&self, meta_key: &str) -> Option<(usize, &MetaMappingRule)> {
        self.index
            .get(meta_key)
            .map(|&position| (position, &self.rules[position]))
    }

    /// Rules in table order.
    #[must_use]
    pub fn rules(&self) -> &[MetaMappingRule] {
        &self.rules
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<MetaMappingRule> for MetaMappingTable {
    fn from_iter<I: IntoIterator<Item = MetaMappingRule>>(iter: I) -> Self {
        let mut table = Self::new();
        for rule in iter {
            table.insert(rule);
        }
        table
    }
}
