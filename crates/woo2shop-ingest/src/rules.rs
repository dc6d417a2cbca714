//! Meta mapping rule table loader.
//!
//! Rule files are CSV with the header
//! `meta_key,name_prefix,name_suffix,sku_prefix,price_field`. Blank cells
//! mean empty strings; duplicate keys keep the first occurrence and warn.

use std::path::Path;

use tracing::debug;

use woo2shop_model::{MetaMappingRule, MetaMappingTable, MigrationWarning, WarningKind};

use crate::error::IngestError;

fn header_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

fn get_string(row: &csv::StringRecord, idx: usize) -> String {
    row.get(idx).map(str::trim).unwrap_or_default().to_string()
}

/// Load a rule table from disk.
///
/// Returns the table plus run-level warnings for ignored duplicate keys.
/// An unreadable or malformed file is an error; callers that want the
/// degraded empty-table behavior downgrade it themselves.
///
/// # Errors
///
/// Returns [`IngestError`] when the file cannot be read, is not valid CSV,
/// or lacks one of the required header columns.
pub fn load_meta_mapping(
    path: &Path,
) -> Result<(MetaMappingTable, Vec<MigrationWarning>), IngestError> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::io(path, e))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes.as_slice());
    let headers = reader
        .headers()
        .map_err(|e| IngestError::csv(path, e.to_string()))?
        .clone();

    let idx_meta_key = header_index(&headers, "meta_key")
        .ok_or(IngestError::MissingColumn {
            path: path.to_path_buf(),
            column: "meta_key",
        })?;
    let idx_name_prefix = header_index(&headers, "name_prefix")
        .ok_or(IngestError::MissingColumn {
            path: path.to_path_buf(),
            column: "name_prefix",
        })?;
    let idx_name_suffix = header_index(&headers, "name_suffix")
        .ok_or(IngestError::MissingColumn {
            path: path.to_path_buf(),
            column: "name_suffix",
        })?;
    let idx_sku_prefix = header_index(&headers, "sku_prefix")
        .ok_or(IngestError::MissingColumn {
            path: path.to_path_buf(),
            column: "sku_prefix",
        })?;
    let idx_price_field = header_index(&headers, "price_field")
        .ok_or(IngestError::MissingColumn {
            path: path.to_path_buf(),
            column: "price_field",
        })?;

    let mut table = MetaMappingTable::new();
    let mut warnings = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| IngestError::csv(path, e.to_string()))?;
        let meta_key = get_string(&row, idx_meta_key);
        if meta_key.is_empty() {
            continue;
        }
        let rule = MetaMappingRule {
            meta_key: meta_key.clone(),
            name_prefix: get_string(&row, idx_name_prefix),
            name_suffix: get_string(&row, idx_name_suffix),
            sku_prefix: get_string(&row, idx_sku_prefix),
            price_field: get_string(&row, idx_price_field),
        };
        if !table.insert(rule) {
            warnings.push(MigrationWarning::run_level(
                WarningKind::DuplicateRuleKey,
                format!("duplicate meta_key {meta_key:?} ignored; first occurrence wins"),
            ));
        }
    }

    debug!(
        path = %path.display(),
        rules = table.len(),
        duplicates = warnings.len(),
        "meta mapping loaded"
    );
    Ok((table, warnings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn write_rules(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(content.as_bytes()).expect("write rules");
        file
    }

    #[test]
    fn loads_rules_in_order() {
        let file = write_rules(
            "meta_key,name_prefix,name_suffix,sku_prefix,price_field\n\
             Accent Piece,,Accent Piece,accent-piece-,accent_piece\n\
             Engraving,Custom,,engraving-,engraving_price\n",
        );
        let (table, warnings) = load_meta_mapping(file.path()).expect("loads");
        assert!(warnings.is_empty());
        assert_eq!(table.len(), 2);
        let (position, rule) = table.get("Accent Piece").expect("first rule");
        assert_eq!(position, 0);
        assert_eq!(rule.name_suffix, "Accent Piece");
        assert_eq!(rule.sku_prefix, "accent-piece-");
        assert_eq!(rule.price_field, "accent_piece");
        let (_, engraving) = table.get("Engraving").expect("second rule");
        assert_eq!(engraving.name_prefix, "Custom");
        assert_eq!(engraving.name_suffix, "");
    }

    #[test]
    fn duplicate_keys_warn_and_keep_first() {
        let file = write_rules(
            "meta_key,name_prefix,name_suffix,sku_prefix,price_field\n\
             Engraving,First,,first-,\n\
             Engraving,Second,,second-,\n",
        );
        let (table, warnings) = load_meta_mapping(file.path()).expect("loads");
        assert_eq!(table.len(), 1);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::DuplicateRuleKey);
        assert_eq!(table.get("Engraving").expect("rule").1.sku_prefix, "first-");
    }

    #[test]
    fn missing_column_is_an_error() {
        let file = write_rules("meta_key,name_prefix\nEngraving,Custom\n");
        let error = load_meta_mapping(file.path()).expect_err("must fail");
        assert!(matches!(
            error,
            IngestError::MissingColumn {
                column: "name_suffix",
                ..
            }
        ));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let error = load_meta_mapping(&dir.path().join("missing.csv")).expect_err("must fail");
        assert!(matches!(error, IngestError::Io { .. }));
    }
}
