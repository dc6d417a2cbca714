//! Small text utilities shared by the transformation modules.

/// Convert free text into a lowercase, hyphenated, identifier-safe token.
///
/// Runs of non-alphanumeric characters collapse into a single hyphen;
/// leading and trailing hyphens are trimmed.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;
    for ch in text.chars() {
        let lower = ch.to_ascii_lowercase();
        if lower.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(lower);
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

/// Trim and collapse internal whitespace runs into single spaces.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Capitalize the first letter of each whitespace-separated word, lowering
/// the rest. Used to clean WooCommerce attribute names (`size` -> `Size`).
#[must_use]
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, word) in text.split_whitespace().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.extend(chars.flat_map(char::to_lowercase));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn slugify_basic() {
        assert_eq!(slugify("Olive Wood"), "olive-wood");
        assert_eq!(slugify("accent-piece-Olive Wood"), "accent-piece-olive-wood");
        assert_eq!(slugify("  --Gift Wrap!  "), "gift-wrap");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn collapse_whitespace_trims_and_squeezes() {
        assert_eq!(collapse_whitespace("  Olive  Wood   Accent Piece "), "Olive Wood Accent Piece");
        assert_eq!(collapse_whitespace("\tsingle\n"), "single");
        assert_eq!(collapse_whitespace("   "), "");
    }

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("size"), "Size");
        assert_eq!(title_case("wood TYPE"), "Wood Type");
    }

    proptest! {
        #[test]
        fn slugify_output_is_identifier_safe(input in ".*") {
            let slug = slugify(&input);
            prop_assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
            prop_assert!(!slug.starts_with('-'));
            prop_assert!(!slug.ends_with('-'));
            prop_assert!(!slug.contains("--"));
        }

        #[test]
        fn collapse_whitespace_is_idempotent(input in ".*") {
            let once = collapse_whitespace(&input);
            prop_assert_eq!(collapse_whitespace(&once), once.clone());
            prop_assert!(!once.starts_with(' ') && !once.ends_with(' '));
            prop_assert!(!once.contains("  "));
        }
    }
}
