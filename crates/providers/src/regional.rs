//! The regional book catalog source.
//!
//! Scrapes the Iranian bookseller catalog's product pages. Product URLs are
//! keyed by the 10-digit form of the ISBN; the page's `<title>` carries the
//! book title and a comma-separated contributor list with parenthetical
//! role markers, and the body rows carry publisher, year, and ISBN.

use std::sync::Arc;
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use tracing::debug;

use citeforge_config::AppConfig;
use citeforge_core::fetch::Fetch;
use citeforge_core::name::Name;
use citeforge_core::record::Record;
use citeforge_core::text::title_tag;

use crate::isbn::regional_key;
use crate::source::BibSource;

/// Body text of the catalog's "no such product" page.
const NOT_FOUND_MARKER: &str = "صفحه مورد نظر پبدا نشد.";

const EDITOR_MARKER: &str = "(ويراستار)";
const TRANSLATOR_MARKER: &str = "(مترجم)";

static TITLE_SPLIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"آدینه بوک:\s*(?P<title>.*?)\s*~\s*(?P<names>.*?)\s*$")
        .expect("TITLE_SPLIT is valid")
});

static PUBLISHER_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"نشر:</b>\s*(?P<result>[^<(]+?)\s*\(").expect("PUBLISHER_ROW is valid")
});

static YEAR_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"نشر:</b>[^<]*\([^)]*?(?P<result>\d{4})\)</li>").expect("YEAR_ROW is valid")
});

static ISBN_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"شابک:.*?(?P<result>[\d-]+X?)</span></li>").expect("ISBN_ROW is valid")
});

static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("PARENTHETICAL is valid"));

pub struct RegionalCatalog {
    fetch: Arc<dyn Fetch>,
    base_url: String,
}

impl RegionalCatalog {
    pub fn new(fetch: Arc<dyn Fetch>, config: &AppConfig) -> Self {
        Self {
            fetch,
            base_url: config.sources.regional_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Product URL for an ISBN (10-digit key).
    pub fn product_url(&self, isbn: &str) -> String {
        format!("{}/{}", self.base_url, regional_key(isbn))
    }
}

#[async_trait]
impl BibSource for RegionalCatalog {
    fn name(&self) -> &str {
        "regional-catalog"
    }

    async fn lookup(&self, isbn: &str) -> Option<Record> {
        let url = self.product_url(isbn);
        let doc = match self.fetch.fetch(&url).await {
            Ok(doc) => doc,
            Err(error) => {
                debug!(%url, %error, "regional catalog fetch failed");
                return None;
            }
        };
        if doc.text.contains(NOT_FOUND_MARKER) {
            return None;
        }
        parse_product_page(&doc.text)
    }
}

/// Parse a catalog product page into a record.
fn parse_product_page(html: &str) -> Option<Record> {
    let title_text = title_tag(html)?;
    let caps = TITLE_SPLIT.captures(&title_text)?;

    let mut record = Record::new();
    record.cite_type = Some("book".into());
    record.title = Some(caps["title"].to_string());

    for raw_name in caps["names"].split('،') {
        let raw_name = raw_name.trim();
        if raw_name.is_empty() {
            continue;
        }
        if let Some((person, _)) = raw_name.split_once(EDITOR_MARKER) {
            record.editors.push(person_name(person.trim()));
            continue;
        }
        if let Some((person, _)) = raw_name.split_once(TRANSLATOR_MARKER) {
            record.translators.push(person_name(person.trim()));
            continue;
        }
        if raw_name.contains('(') {
            let person = PARENTHETICAL.replace(raw_name, "");
            record.others.push(person_name(person.trim()));
            continue;
        }
        record.authors.push(person_name(raw_name));
    }

    if let Some(caps) = PUBLISHER_ROW.captures(html) {
        record.publisher = Some(caps["result"].to_string());
    }
    if let Some(caps) = YEAR_ROW.captures(html) {
        record.year = Some(caps["result"].to_string());
    }
    if let Some(caps) = ISBN_ROW.captures(html) {
        record.isbn = Some(caps["result"].to_string());
    }
    Some(record)
}

/// Split a contributor into (first, last); single-token and unsplittable
/// designations become organization entries.
fn person_name(text: &str) -> Name {
    Name::from_fullname(text).unwrap_or_else(|_| Name::organization(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRODUCT_PAGE: &str = "\
<html><head><title>آدینه بوک: فیزیک هسته‌ای ~کنت کرین (مترجم)، مهدی صفا</title></head>\
<body>\
<li><b>نشر:</b> مرکز نشر دانشگاهی (چاپ 1387)</li>\
<li>شابک: <span>964-01-0347-3</span></li>\
</body></html>";

    #[test]
    fn product_page_parses() {
        let record = parse_product_page(PRODUCT_PAGE).unwrap();
        assert_eq!(record.cite_type.as_deref(), Some("book"));
        assert_eq!(record.title.as_deref(), Some("فیزیک هسته‌ای"));
        assert_eq!(record.translators.len(), 1);
        assert_eq!(record.authors.len(), 1);
        assert_eq!(record.publisher.as_deref(), Some("مرکز نشر دانشگاهی"));
        assert_eq!(record.year.as_deref(), Some("1387"));
        assert_eq!(record.isbn.as_deref(), Some("964-01-0347-3"));
    }

    #[test]
    fn page_without_catalog_title_is_none() {
        assert_eq!(parse_product_page("<title>some other shop</title>"), None);
    }
}
