//! Recoverable conditions surfaced as warnings instead of errors.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of a recoverable condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// A rule file row repeated an existing `meta_key` and was ignored.
    DuplicateRuleKey,
    /// The rule table could not be loaded; the run proceeds with an empty one.
    RuleTableUnavailable,
    /// More than the retained number of variant dimensions were seen.
    VariantDimensionOverflow,
    /// A variant entry could not be decoded or lacked its SKU and was skipped.
    MalformedVariantEntry,
    /// A matched rule's `price_field` was absent; the price defaulted to zero.
    MissingMetaPrice,
    /// Strict mode only: a metadata key matched no rule.
    UnmatchedMetaKey,
    /// The billing address payload could not be decoded.
    MalformedAddress,
    /// The order date did not match any accepted format and passed through.
    UnparseableOrderDate,
}

impl WarningKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DuplicateRuleKey => "duplicate rule key",
            Self::RuleTableUnavailable => "rule table unavailable",
            Self::VariantDimensionOverflow => "variant dimension overflow",
            Self::MalformedVariantEntry => "malformed variant entry",
            Self::MissingMetaPrice => "missing meta price",
            Self::UnmatchedMetaKey => "unmatched meta key",
            Self::MalformedAddress => "malformed address",
            Self::UnparseableOrderDate => "unparseable order date",
        }
    }
}

/// One recoverable condition, tagged with the originating record where one
/// exists (configuration warnings are run-level and carry no record).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationWarning {
    pub record_id: Option<String>,
    pub kind: WarningKind,
    pub message: String,
}

impl MigrationWarning {
    #[must_use]
    pub fn run_level(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            record_id: None,
            kind,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn for_record(
        record_id: impl Into<String>,
        kind: WarningKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            record_id: Some(record_id.into()),
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for MigrationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.record_id {
            Some(id) => write!(f, "[{id}] {}: {}", self.kind.as_str(), self.message),
            None => write!(f, "{}: {}", self.kind.as_str(), self.message),
        }
    }
}
