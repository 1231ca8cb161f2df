//! Plain-text utilities over raw HTML.
//!
//! Tag stripping and entity unescaping are capabilities the heuristics rely
//! on; the implementations here are deliberately small (regex substitution
//! and a reduced entity table) — full DOM fidelity is not a goal.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static TAGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</?[a-z][^>]*>").expect("TAGS pattern is valid"));

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#(?:x[0-9a-fA-F]{1,6}|[0-9]{1,7})|[a-zA-Z][a-zA-Z0-9]{1,30});")
        .expect("ENTITY pattern is valid")
});

static TITLE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<title\b[^>]*>(?P<result>.*?)</title\s*>").expect("TITLE_TAG is valid")
});

/// The `<title>` tag content, trimmed and HTML-unescaped.
pub fn title_tag(html: &str) -> Option<String> {
    let caps = TITLE_TAG.captures(html)?;
    let text = unescape_html(caps.name("result")?.as_str().trim());
    if text.is_empty() { None } else { Some(text) }
}

/// Remove markup tags, leaving the text content.
pub fn strip_tags(html: &str) -> String {
    TAGS.replace_all(html, "").into_owned()
}

/// Decode numeric character references and the common named entities.
/// Unknown entities are left untouched.
pub fn unescape_html(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let entity = &caps[0][1..caps[0].len() - 1];
            decode_entity(entity).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn decode_entity(entity: &str) -> Option<String> {
    if let Some(numeric) = entity.strip_prefix('#') {
        let code = if let Some(hex) = numeric.strip_prefix(['x', 'X']) {
            u32::from_str_radix(hex, 16).ok()?
        } else {
            numeric.parse().ok()?
        };
        return char::from_u32(code).map(String::from);
    }
    let decoded: Cow<'_, str> = match entity {
        "amp" => "&".into(),
        "lt" => "<".into(),
        "gt" => ">".into(),
        "quot" => "\"".into(),
        "apos" => "'".into(),
        "nbsp" => "\u{a0}".into(),
        "ndash" => "\u{2013}".into(),
        "mdash" => "\u{2014}".into(),
        "lsquo" => "\u{2018}".into(),
        "rsquo" => "\u{2019}".into(),
        "ldquo" => "\u{201c}".into(),
        "rdquo" => "\u{201d}".into(),
        "hellip" => "\u{2026}".into(),
        "copy" => "\u{a9}".into(),
        _ => return None,
    };
    Some(decoded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_nested_tags() {
        assert_eq!(
            strip_tags("<div class=\"byline\">By <a href=\"/x\">Jane Doe</a></div>"),
            "By Jane Doe"
        );
    }

    #[test]
    fn leaves_plain_text_alone() {
        assert_eq!(strip_tags("2 < 3 and nothing else"), "2 < 3 and nothing else");
    }

    #[test]
    fn unescapes_named_and_numeric() {
        assert_eq!(
            unescape_html("Tom &amp; Jerry &#8212; &quot;cat&quot; &#x2019;"),
            "Tom & Jerry \u{2014} \"cat\" \u{2019}"
        );
    }

    #[test]
    fn unknown_entity_passes_through() {
        assert_eq!(unescape_html("&bogus12;"), "&bogus12;");
    }
}
