//! ISBN detection, normalization, and region classification.

use std::sync::LazyLock;

use regex::Regex;

static ISBN13_SEARCH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b97[89](?:[-\s]?\d){10}\b").expect("ISBN13_SEARCH is valid"));

static ISBN10_SEARCH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d(?:[-\s]?[\dXx]){9}\b").expect("ISBN10_SEARCH is valid"));

/// Registration groups assigned to the regional (Iranian) agency.
const REGIONAL_GROUPS: &[&str] = &["964", "600", "622"];

/// Find an ISBN inside arbitrary text; ISBN-13 takes precedence.
pub fn find_isbn(text: &str) -> Option<String> {
    ISBN13_SEARCH
        .find(text)
        .or_else(|| ISBN10_SEARCH.find(text))
        .map(|m| m.as_str().to_string())
}

/// Remove hyphens and spaces.
pub fn normalize(isbn: &str) -> String {
    isbn.chars().filter(|c| !matches!(c, '-' | ' ')).collect()
}

/// Whether the ISBN's registration group belongs to the regional agency.
pub fn is_regional(isbn: &str) -> bool {
    let digits = normalize(isbn);
    let body = if digits.len() == 13 { &digits[3..] } else { digits.as_str() };
    REGIONAL_GROUPS.iter().any(|group| body.starts_with(group))
}

/// The 10-digit key used by the regional catalog's product URLs:
/// an ISBN-13 drops its prefix element.
pub fn regional_key(isbn: &str) -> String {
    let digits = normalize(isbn);
    if digits.len() == 13 {
        digits[3..].to_string()
    } else {
        digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_isbn13_with_hyphens() {
        assert_eq!(
            find_isbn("ISBN 978-964-448-564-4 (pbk.)").as_deref(),
            Some("978-964-448-564-4")
        );
    }

    #[test]
    fn finds_isbn10_with_check_x() {
        assert_eq!(find_isbn("see 964-6194-70-X for details").as_deref(), Some("964-6194-70-X"));
    }

    #[test]
    fn isbn13_takes_precedence() {
        let text = "old: 0-596-52068-9 new: 978-0-596-52068-7";
        assert_eq!(find_isbn(text).as_deref(), Some("978-0-596-52068-7"));
    }

    #[test]
    fn plain_text_has_no_isbn() {
        assert_eq!(find_isbn("no identifiers here"), None);
    }

    #[test]
    fn regional_groups_detected() {
        assert!(is_regional("978-964-448-564-4"));
        assert!(is_regional("964-6194-70-X"));
        assert!(is_regional("978-600-119-125-1"));
        assert!(!is_regional("978-0-596-52068-7"));
    }

    #[test]
    fn regional_key_drops_ean_prefix() {
        assert_eq!(regional_key("978-964-448-564-4"), "9644485644");
        assert_eq!(regional_key("964-448-564-4"), "9644485644");
    }
}
