//! Author extraction — byline discovery and byline-to-names parsing.
//!
//! Discovery sweeps the document in a fixed order: author meta tags, byline
//! elements (by class/id/rel), `authorName` JSON fields, schema.org Person
//! entries, and finally a plain-text `By Name(, Name)*` pattern over the
//! tag-stripped document. Within the meta and element passes only matches
//! found by the same criteria are combined; a hit by a different criterion
//! ends the pass.
//!
//! `byline_to_names` is the free-text parser: it rejects label-like text,
//! normalizes separators, and splits the remainder into [`Name`]s with a
//! confidence gate per segment.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use citeforge_core::date::any_date_span;
use citeforge_core::name::Name;
use citeforge_core::text::strip_tags;

/// Byline segments naming a role or an outlet rather than a person.
static STOPWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)\b(?:Administrator|By|Correspondent|Editors?|News|Office|People|Reporter|Staff",
        r"|Writer|سایت)\b",
        r"|\.(?:com|ir)\b",
        r"|www\.",
    ))
    .expect("STOPWORDS is valid")
});

static FOUR_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}$").expect("FOUR_DIGITS is valid"));

static NORMALIZE_ANDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+and\s+").expect("NORMALIZE_ANDS is valid"));

static NORMALIZE_COMMA_SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*,\s+").expect("NORMALIZE_COMMA_SPACES is valid"));

static BY_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bby\s+").expect("BY_PREFIX is valid"));

static TRAILING_AND_OR_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?: and|,)?\s*$").expect("TRAILING_AND_OR_COMMA is valid"));

/// Separators when commas are known to separate whole names.
static SPLIT_WITH_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i), and | and |, |;").expect("SPLIT_WITH_COMMA is valid"));

/// Separators when a comma may separate a lastname from a firstname.
static SPLIT_WITHOUT_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i), and | and |;").expect("SPLIT_WITHOUT_COMMA is valid"));

const AUTHOR_META_NAMES: &str = "citation_authors?|article:author|og:author|author";

static META_AUTHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        concat!(
            r#"(?i)<meta\s[^>]*?(?:"#,
            r#"(?:name|property)\s*=\s*["']?(?P<id1>{names})\b["']?[\s/][^>]*?"#,
            r#"content\s*=\s*(?:"(?P<c1>[^"]*)"|'(?P<c2>[^']*)'|(?P<c3>[^\s"'>]+))"#,
            r#"|"#,
            r#"content\s*=\s*(?:"(?P<c4>[^"]*)"|'(?P<c5>[^']*)'|(?P<c6>[^\s"'>]+))[\s/][^>]*?"#,
            r#"(?:name|property)\s*=\s*["']?(?P<id2>{names})\b["']?[\s/>]"#,
            r#")"#,
        ),
        names = AUTHOR_META_NAMES,
    ))
    .expect("META_AUTHOR is valid")
});

/// Opening tag of a byline element. The body is cut at the matching close
/// tag found separately — the regex engine cannot backreference the tag
/// name.
static BYLINE_TAG_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"(?i)<(?P<tag>[a-z][a-z0-9]*)\s[^>]*?"#,
        r#"(?:class|id|rel)\s*=\s*["']?"#,
        r#"(?P<id>author(?:_byline|inline|-title|s)?|byline(?:author|-name)?"#,
        r#"|by_line(?:_date)?|meta-author|story-byline)"#,
        r#"\b["']?[^>]*?>"#,
    ))
    .expect("BYLINE_TAG_OPEN is valid")
});

static AUTHOR_NAME_JSON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)authorName["']?\s*:\s*["'](?P<result>[^"'>\n]+)["']"#)
        .expect("AUTHOR_NAME_JSON is valid")
});

static SCHEMA_PERSON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#""author"\s*:\s*\[?\{\s*"@type"\s*:\s*"Person"\s*,\s*"#,
        r#""name"\s*:\s*"(?P<result>[^"]*)""#,
    ))
    .expect("SCHEMA_PERSON is valid")
});

/// Inner `class="author"` spans inside a byline element.
static BYLINE_AUTHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<[a-z][^>]*?class\s*=\s*["']?author\b["']?[^>]*>(?P<result>[^<>]+)"#)
        .expect("BYLINE_AUTHOR is valid")
});

/// Two-or-three-part capitalizable name token used by the text byline
/// pattern.
const NAME_PATTERN: &str = r"\w[\w.-]*? \w[\w.-]*?(?: \w[\w.-]+?)?";

static BYLINE_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)[\n|]\s*By\s+{name}(?:(?:,\s|,?\s+and\s){name}){{0,3}}\s*\n",
        name = NAME_PATTERN,
    ))
    .expect("BYLINE_TEXT is valid")
});

fn is_all_uppercase(text: &str) -> bool {
    let mut cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}

fn is_all_lowercase(text: &str) -> bool {
    let mut cased = false;
    for c in text.chars() {
        if c.is_uppercase() {
            return false;
        }
        if c.is_lowercase() {
            cased = true;
        }
    }
    cased
}

/// Parse a free-text byline into an ordered name list.
///
/// Returns `None` when the text cannot be a name list: it carries a colon
/// (a label), is empty once a leading date is stripped, or is a bare
/// four-digit number. Segments that fail the confidence gate are dropped;
/// when nothing survives the whole byline is rejected.
pub fn byline_to_names(byline: &str) -> Option<Vec<Name>> {
    let byline = byline.split('|').next().unwrap_or_default();
    let mut byline = byline.trim_matches([' ', ';', '\t', '\n']).to_string();
    if byline.contains(':') {
        return None;
    }
    if let Some((range, _)) = any_date_span(&byline) {
        byline.truncate(range.start);
    }
    if byline.trim().is_empty() {
        return None;
    }
    if FOUR_DIGITS.is_match(byline.trim()) {
        return None;
    }
    // Normalize "and\n" and the like to a standard " and " before the
    // byline is cut at the first newline.
    let byline = NORMALIZE_ANDS.replace_all(&byline, " and ");
    let byline = NORMALIZE_COMMA_SPACES.replace_all(&byline, ", ");
    let rest = match BY_PREFIX.find(&byline) {
        Some(m) => &byline[m.end()..],
        None => &byline,
    };
    let line = rest.split(['\r', '\n']).next().unwrap_or_default();
    let line = TRAILING_AND_OR_COMMA.replace(line, "");

    // A lone comma is ambiguous: it separates whole names only when an
    // " and " is present or the first comma-delimited chunk already holds a
    // full name.
    let first_chunk = line.split(", ").next().unwrap_or_default();
    let fullnames: Vec<&str> = if line.to_lowercase().contains(" and ") || first_chunk.contains(' ')
    {
        SPLIT_WITH_COMMA.split(&line).collect()
    } else {
        SPLIT_WITHOUT_COMMA.split(&line).collect()
    };

    let mut names: Vec<Name> = Vec::new();
    for fullname in fullnames {
        let fullname = fullname.split(" in ").next().unwrap_or_default();
        let fullname = fullname.split(" for ").next().unwrap_or_default();
        if STOPWORDS.is_match(fullname) || is_all_uppercase(fullname.trim()) {
            continue;
        }
        let Ok(name) = Name::from_fullname(fullname) else {
            continue;
        };
        if name.first.starts_with("The ")
            || name.first.starts_with("خبرگزار")
            || is_all_lowercase(&name.last)
        {
            names.push(Name::organization(name.fullname()));
        } else {
            names.push(name);
        }
    }
    if names.is_empty() {
        return None;
    }
    // Keep organization-only entries only when no personal name survived.
    let first_found = names[0].clone();
    let persons: Vec<Name> = names.into_iter().filter(|n| !n.first.is_empty()).collect();
    if persons.is_empty() {
        Some(vec![first_found])
    } else {
        Some(persons)
    }
}

/// Find the author list of a document.
pub fn find_authors(html: &str) -> Option<Vec<Name>> {
    if let Some(names) = authors_from_meta(html) {
        return Some(names);
    }
    if let Some(names) = authors_from_byline_tags(html) {
        return Some(names);
    }
    if let Some(names) = authors_from_json(html, &AUTHOR_NAME_JSON) {
        return Some(names);
    }
    if let Some(names) = authors_from_json(html, &SCHEMA_PERSON) {
        return Some(names);
    }
    BYLINE_TEXT
        .find(&strip_tags(html))
        .and_then(|m| byline_to_names(m.as_str()))
}

/// Author meta tags, combining only matches found by the same attribute.
fn authors_from_meta(html: &str) -> Option<Vec<Name>> {
    let mut names = Vec::new();
    let mut match_id: Option<String> = None;
    for caps in META_AUTHOR.captures_iter(html) {
        let id = caps
            .name("id1")
            .or_else(|| caps.name("id2"))
            .map(|m| m.as_str().to_lowercase());
        if match_id.is_some() && id != match_id {
            break;
        }
        let content = ["c1", "c2", "c3", "c4", "c5", "c6"]
            .into_iter()
            .find_map(|g| caps.name(g))
            .map(|m| m.as_str());
        if let Some(parsed) = content.and_then(byline_to_names) {
            names.extend(parsed);
            match_id = id;
        }
    }
    if names.is_empty() { None } else { Some(names) }
}

/// Byline elements located by class/id/rel attribute values.
fn authors_from_byline_tags(html: &str) -> Option<Vec<Name>> {
    let mut names = Vec::new();
    let mut match_id: Option<String> = None;
    let mut seen_bodies: HashSet<String> = HashSet::new();
    for caps in BYLINE_TAG_OPEN.captures_iter(html) {
        let id = caps.name("id").map(|m| m.as_str().to_lowercase());
        if match_id.is_some() && id != match_id {
            break;
        }
        let tag = &caps["tag"];
        let open_end = caps.get(0).map(|m| m.end()).unwrap_or_default();
        let Some(body) = element_body(&html[open_end..], tag) else {
            continue;
        };
        if !seen_bodies.insert(body.to_string()) {
            break; // avoid duplicate results
        }
        let tag_text = strip_tags(body);
        if let Some(parsed) = byline_to_names(&tag_text) {
            match_id = id;
            names.extend(parsed);
            continue;
        }
        for inner in BYLINE_AUTHOR.captures_iter(body) {
            if let Some(parsed) = byline_to_names(&inner["result"]) {
                names.extend(parsed);
            }
        }
        if !names.is_empty() {
            return Some(names);
        }
    }
    if names.is_empty() { None } else { Some(names) }
}

/// The body of an element, up to its first matching close tag.
fn element_body<'h>(rest: &'h str, tag: &str) -> Option<&'h str> {
    let close = Regex::new(&format!(r"(?i)</{}\b", regex::escape(tag))).ok()?;
    let m = close.find(rest)?;
    Some(&rest[..m.start()])
}

/// JSON-embedded author names (`authorName` fields, schema.org Person
/// entries).
fn authors_from_json(html: &str, pattern: &Regex) -> Option<Vec<Name>> {
    let mut names = Vec::new();
    for caps in pattern.captures_iter(html) {
        if let Some(parsed) = byline_to_names(&caps["result"]) {
            names.extend(parsed);
        }
    }
    if names.is_empty() { None } else { Some(names) }
}
