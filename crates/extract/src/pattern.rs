//! First-match-wins pattern chains over raw HTML.
//!
//! Every per-field extractor is an ordered list of independent regex
//! candidates. The first candidate producing a non-empty capture wins and no
//! later candidate may override it — reordering changes behavior on
//! ambiguous real-world pages, so chain order is part of each field's
//! contract.
//!
//! Meta-tag candidates accept both attribute orders
//! (`name=... content=...` and `content=... name=...`), both quote styles,
//! and unquoted attribute values.

use regex::Regex;

/// An ordered list of pattern candidates for one field.
pub struct PatternChain {
    patterns: Vec<Regex>,
}

impl PatternChain {
    pub fn new(patterns: Vec<Regex>) -> Self {
        Self { patterns }
    }

    /// Try each candidate in priority order; return the first non-empty
    /// capture, trimmed. Unmatched input yields `None`, never an error.
    pub fn find(&self, haystack: &str) -> Option<String> {
        for pattern in &self.patterns {
            for caps in pattern.captures_iter(haystack) {
                if let Some(value) = first_participating(&caps) {
                    let value = value.trim();
                    if !value.is_empty() {
                        return Some(value.to_string());
                    }
                }
            }
        }
        None
    }
}

/// The first participating capture group of a match.
///
/// Candidate patterns name their capture groups freely; only one group
/// participates per match (quote-style and attribute-order variants are
/// disjoint alternations).
pub fn first_participating<'t>(caps: &regex::Captures<'t>) -> Option<&'t str> {
    caps.iter()
        .skip(1)
        .flatten()
        .next()
        .map(|m| m.as_str())
}

/// A `content=` attribute with its value captured, for each quote style.
/// Group names are suffixed so a candidate can embed two copies.
fn content_attr(suffix: &str) -> String {
    format!(
        r#"content\s*=\s*(?:"(?P<d{suffix}>[^"]*)"|'(?P<s{suffix}>[^']*)'|(?P<u{suffix}>[^\s"'>]+))"#
    )
}

/// A `name=`/`property=` attribute whose value is one of `names`
/// (an alternation body, regex syntax allowed).
fn meta_name_attr(names: &str) -> String {
    format!(r#"(?:name|property)\s*=\s*["']?(?:{names})\b["']?"#)
}

/// A meta-tag candidate: `<meta>` carrying one of `names` and a content
/// attribute, in either order.
pub fn meta_pattern(names: &str) -> Regex {
    let name_attr = meta_name_attr(names);
    let content_fwd = content_attr("f");
    let content_rev = content_attr("r");
    Regex::new(&format!(
        r"(?i)<meta\s[^>]*?(?:{name_attr}[\s/][^>]*?{content_fwd}|{content_rev}[\s/][^>]*?{name_attr}[\s/>])"
    ))
    .expect("meta pattern is valid")
}

/// An element-body candidate: a tag with one of `classes` as its class
/// attribute, capturing the text up to the next tag.
pub fn class_text_pattern(classes: &str) -> Regex {
    Regex::new(&format!(
        r#"(?i)class\s*=\s*["'](?:{classes})["'][^>]*?>(?P<result>[^<]*)<"#
    ))
    .expect("class pattern is valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_name_then_content() {
        let re = meta_pattern("citation_title|og:title");
        let caps = re
            .captures(r#"<meta name="citation_title" content="A Title"/>"#)
            .unwrap();
        assert_eq!(first_participating(&caps), Some("A Title"));
    }

    #[test]
    fn meta_content_then_name() {
        let re = meta_pattern("citation_title|og:title");
        let caps = re
            .captures(r#"<meta content='A Title' property='og:title'>"#)
            .unwrap();
        assert_eq!(first_participating(&caps), Some("A Title"));
    }

    #[test]
    fn meta_unquoted_attributes() {
        let re = meta_pattern("article:author|author");
        let caps = re
            .captures(r#"<meta property=article:author content="Brian Truitt"/>"#)
            .unwrap();
        assert_eq!(first_participating(&caps), Some("Brian Truitt"));
    }

    #[test]
    fn meta_name_must_match_whole_value() {
        let re = meta_pattern("title");
        assert!(re.captures(r#"<meta name="subtitle2" content="No"/>"#).is_none());
    }

    #[test]
    fn chain_respects_priority_order() {
        let chain = PatternChain::new(vec![
            meta_pattern("citation_title"),
            meta_pattern("og:title"),
        ]);
        let html = r#"
            <meta property="og:title" content="Social title">
            <meta name="citation_title" content="Scholarly title">
        "#;
        // citation_title is the higher-priority candidate even though the
        // og:title tag appears first in the document.
        assert_eq!(chain.find(html).as_deref(), Some("Scholarly title"));
    }

    #[test]
    fn chain_skips_empty_captures() {
        let chain = PatternChain::new(vec![
            meta_pattern("citation_title"),
            meta_pattern("og:title"),
        ]);
        let html = r#"
            <meta name="citation_title" content="">
            <meta property="og:title" content="Fallback">
        "#;
        assert_eq!(chain.find(html).as_deref(), Some("Fallback"));
    }

    #[test]
    fn class_text_candidate() {
        let re = class_text_pattern("main-hed|heading1");
        let caps = re
            .captures(r#"<h1 class="main-hed" id="x">Big Story</h1>"#)
            .unwrap();
        assert_eq!(first_participating(&caps), Some("Big Story"));
    }
}
