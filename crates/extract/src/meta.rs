//! Per-field extractors over raw HTML.
//!
//! Each finder is a pure function `html -> Option<field>` backed by an
//! ordered pattern chain (see [`crate::pattern`]). Chain order is the
//! field's tie-break contract.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use url::Url;

use citeforge_core::date::{any_date_span, find_any_date};
use citeforge_core::text::unescape_html;

use crate::pattern::{class_text_pattern, first_participating, meta_pattern, PatternChain};

static TITLE_CHAIN: LazyLock<PatternChain> = LazyLock::new(|| {
    PatternChain::new(vec![
        meta_pattern("citation_title|title|Headline|og:title"),
        class_text_pattern("main-hed|heading1"),
    ])
});

static URL_CHAIN: LazyLock<PatternChain> = LazyLock::new(|| {
    PatternChain::new(vec![meta_pattern("og:url"), link_canonical_pattern()])
});

/// A `<link rel="canonical" href="...">` candidate, in either attribute
/// order.
fn link_canonical_pattern() -> Regex {
    let rel = r#"rel\s*=\s*["']?canonical\b["']?"#;
    let href_fwd = r#"href\s*=\s*(?:"(?P<ld>[^"]*)"|'(?P<ls>[^']*)'|(?P<lu>[^\s"'>]+))"#;
    let href_rev = r#"href\s*=\s*(?:"(?P<ld2>[^"]*)"|'(?P<ls2>[^']*)'|(?P<lu2>[^\s"'>]+))"#;
    Regex::new(&format!(
        r"(?i)<link\s[^>]*?(?:{rel}[\s/][^>]*?{href_fwd}|{href_rev}[\s/][^>]*?{rel}[\s/>])"
    ))
    .expect("link canonical pattern is valid")
}

static JOURNAL_CHAIN: LazyLock<PatternChain> =
    LazyLock::new(|| PatternChain::new(vec![meta_pattern("citation_journal_title")]));

static ISSN_CHAIN: LazyLock<PatternChain> =
    LazyLock::new(|| PatternChain::new(vec![meta_pattern("citation_issn")]));

static PMID_CHAIN: LazyLock<PatternChain> =
    LazyLock::new(|| PatternChain::new(vec![meta_pattern("citation_pmid")]));

static DOI_CHAIN: LazyLock<PatternChain> =
    LazyLock::new(|| PatternChain::new(vec![meta_pattern("citation_doi")]));

static VOLUME_CHAIN: LazyLock<PatternChain> =
    LazyLock::new(|| PatternChain::new(vec![meta_pattern("citation_volume")]));

static ISSUE_CHAIN: LazyLock<PatternChain> =
    LazyLock::new(|| PatternChain::new(vec![meta_pattern("citation_issue")]));

static FIRST_PAGE_CHAIN: LazyLock<PatternChain> =
    LazyLock::new(|| PatternChain::new(vec![meta_pattern("citation_firstpage")]));

static LAST_PAGE_CHAIN: LazyLock<PatternChain> =
    LazyLock::new(|| PatternChain::new(vec![meta_pattern("citation_lastpage")]));

static SITE_NAME_CHAIN: LazyLock<PatternChain> =
    LazyLock::new(|| PatternChain::new(vec![meta_pattern("og:site_name")]));

static DATE_META: LazyLock<Regex> = LazyLock::new(|| {
    meta_pattern(concat!(
        "article:(?:modified_time|published_time)",
        "|citation_(?:date|publication_date)",
        "|date",
        "|DC\\.date\\.[^'\">\\s]*",
        "|last-modified",
        "|pub_?date",
        "|sailthru\\.date",
    ))
});

static DATE_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)date(?:Published|line)").expect("DATE_KEYWORD is valid"));

/// The hostname of `url`, with any leading `www.` removed.
pub fn hostname(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    Some(host.strip_prefix("www.").unwrap_or(host).to_string())
}

/// Canonical URL: an `og:url` whose path component is non-empty, else the
/// input URL.
pub fn find_url(html: &str, url: &str) -> String {
    if let Some(og_url) = URL_CHAIN.find(html) {
        if let Ok(parsed) = Url::parse(&og_url) {
            if !parsed.path().is_empty() && parsed.path() != "/" {
                return og_url;
            }
        }
    }
    url.to_string()
}

/// The dedicated title meta field or headline element, HTML-unescaped.
pub fn find_title_meta(html: &str) -> Option<String> {
    TITLE_CHAIN.find(html).map(|t| unescape_html(&t))
}

pub use citeforge_core::text::title_tag;

/// Journal title as declared by scholarly meta tags.
pub fn find_journal(html: &str) -> Option<String> {
    JOURNAL_CHAIN.find(html)
}

/// International Standard Serial Number. The dotted `\d{4}-\d{3}[\dX]` shape
/// is not enforced; whatever the page declares is passed through.
pub fn find_issn(html: &str) -> Option<String> {
    ISSN_CHAIN.find(html)
}

/// PubMed identifier.
pub fn find_pmid(html: &str) -> Option<String> {
    PMID_CHAIN.find(html)
}

/// Digital Object Identifier.
pub fn find_doi(html: &str) -> Option<String> {
    DOI_CHAIN.find(html)
}

/// Citation volume number.
pub fn find_volume(html: &str) -> Option<String> {
    VOLUME_CHAIN.find(html)
}

/// Citation issue number.
pub fn find_issue(html: &str) -> Option<String> {
    ISSUE_CHAIN.find(html)
}

/// Page range, joined `first–last` only when both ends are declared.
pub fn find_pages(html: &str) -> Option<String> {
    let first = FIRST_PAGE_CHAIN.find(html)?;
    let last = LAST_PAGE_CHAIN.find(html)?;
    Some(format!("{first}\u{2013}{last}"))
}

/// The `og:site_name` declaration.
pub fn find_og_site_name(html: &str) -> Option<String> {
    SITE_NAME_CHAIN.find(html)
}

/// Publication date. Candidates in priority order: dated meta tags whose
/// content embeds a date-like substring, inline `datePublished`/`dateline`
/// text, the first date-like substring of the whole document, and finally
/// the URL string itself.
pub fn find_date(html: &str, url: &str) -> Option<NaiveDate> {
    for caps in DATE_META.captures_iter(html) {
        if let Some(content) = first_participating(&caps) {
            if let Some(date) = find_any_date(content) {
                return Some(date);
            }
        }
    }
    if let Some(date) = find_inline_date(html) {
        return Some(date);
    }
    find_any_date(html).or_else(|| find_any_date(url))
}

/// A date immediately following a `datePublished`/`dateline` keyword,
/// separated only by punctuation or whitespace.
fn find_inline_date(html: &str) -> Option<NaiveDate> {
    for keyword in DATE_KEYWORD.find_iter(html) {
        let tail = &html[keyword.end()..];
        if let Some((range, date)) = any_date_span(tail) {
            let gap = &tail[..range.start];
            if !gap.is_empty()
                && gap.chars().all(|c| !c.is_alphanumeric() && c != '_')
            {
                return Some(date);
            }
        }
    }
    None
}
