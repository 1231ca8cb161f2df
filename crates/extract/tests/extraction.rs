//! End-to-end extraction tests against canned documents.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use citeforge_core::error::FetchError;
use citeforge_core::fetch::{Document, Fetch};
use citeforge_core::lang::ScriptDetector;
use citeforge_core::record::UrlStatus;
use citeforge_extract::{extract_from_archive_url, extract_from_url};

/// Serves canned bodies by URL; everything else fails with a transport
/// error.
struct MockFetcher {
    pages: HashMap<String, String>,
}

impl MockFetcher {
    fn new() -> Self {
        Self { pages: HashMap::new() }
    }

    fn with_page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }
}

#[async_trait]
impl Fetch for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<Document, FetchError> {
        match self.pages.get(url) {
            Some(body) => Ok(Document::new(url, body.clone())),
            None => Err(FetchError::Transport(format!("no canned page for {url}"))),
        }
    }
}

const JOURNAL_PAGE: &str = r#"
<html><head>
<title>Neural activity during reaching - Journal of Neurophysiology</title>
<meta name="citation_title" content="Neural activity during reaching">
<meta name="citation_journal_title" content="Journal of Neurophysiology">
<meta name="citation_author" content="Moran, Daniel W.">
<meta name="citation_volume" content="82">
<meta name="citation_issue" content="5">
<meta name="citation_firstpage" content="2676">
<meta name="citation_lastpage" content="2692">
<meta name="citation_issn" content="0022-3077">
<meta name="citation_pmid" content="10561437">
<meta name="citation_doi" content="10.1152/jn.1999.82.5.2676">
<meta name="citation_publication_date" content="1999-11-01">
</head><body>article text</body></html>
"#;

#[tokio::test]
async fn journal_page_extraction() {
    let fetch = Arc::new(
        MockFetcher::new().with_page("http://jn.physiology.org/content/82/5/2676", JOURNAL_PAGE),
    );
    let record = extract_from_url(fetch, &ScriptDetector, "http://jn.physiology.org/content/82/5/2676")
        .await
        .unwrap();

    assert_eq!(record.cite_type.as_deref(), Some("journal"));
    assert_eq!(record.journal.as_deref(), Some("Journal of Neurophysiology"));
    assert_eq!(record.title.as_deref(), Some("Neural activity during reaching"));
    assert_eq!(record.authors.len(), 1);
    assert_eq!(record.authors[0].last, "Moran");
    assert_eq!(record.volume.as_deref(), Some("82"));
    assert_eq!(record.issue.as_deref(), Some("5"));
    assert_eq!(record.page.as_deref(), Some("2676\u{2013}2692"));
    assert_eq!(record.issn.as_deref(), Some("0022-3077"));
    assert_eq!(record.pmid.as_deref(), Some("10561437"));
    assert_eq!(record.doi.as_deref(), Some("10.1152/jn.1999.82.5.2676"));
    assert_eq!(record.year.as_deref(), Some("1999"));
    // Journal pages carry no website field.
    assert_eq!(record.website, None);
    assert_eq!(record.language.as_deref(), Some("en"));
}

const WEB_PAGE: &str = r#"
<html><head>
<title>Rockhopper raises Falklands oil estimate - FT.com</title>
<meta property="og:url" content="http://www.ft.com/cms/s/0/ea29ffb6.html">
<meta name="author" content="By Sylvia Pfeifer">
</head><body>
<p>datePublished: 2011-08-15</p>
</body></html>
"#;

#[tokio::test]
async fn web_page_extraction() {
    let fetch = Arc::new(
        MockFetcher::new()
            .with_page("http://www.ft.com/cms/s/ea29ffb6,Authorised=false.html", WEB_PAGE)
            .with_page("http://www.ft.com", "<title>FT.com: world business news</title>"),
    );
    let record = extract_from_url(
        fetch,
        &ScriptDetector,
        "http://www.ft.com/cms/s/ea29ffb6,Authorised=false.html",
    )
    .await
    .unwrap();

    assert_eq!(record.cite_type.as_deref(), Some("web"));
    assert_eq!(record.url.as_deref(), Some("http://www.ft.com/cms/s/0/ea29ffb6.html"));
    assert_eq!(record.title.as_deref(), Some("Rockhopper raises Falklands oil estimate"));
    assert_eq!(record.website.as_deref(), Some("FT.com"));
    assert_eq!(record.authors.len(), 1);
    assert_eq!(record.authors[0].first, "Sylvia");
    assert_eq!(record.year.as_deref(), Some("2011"));
}

#[tokio::test]
async fn missing_page_surfaces_fetch_error() {
    let fetch = Arc::new(MockFetcher::new());
    let result = extract_from_url(fetch, &ScriptDetector, "http://example.com/gone").await;
    assert!(result.is_err());
}

const ARCHIVE_CAPTURE: &str = r#"
<html><head>
<title>Old story headline - Example News</title>
<meta property="og:site_name" content="Wayback Machine">
</head><body>captured body</body></html>
"#;

const ORIGINAL_SAME: &str = r#"
<html><head>
<title>Old story headline - Example News</title>
<meta name="citation_author" content="Doe, Jane">
</head><body>live body</body></html>
"#;

const ORIGINAL_CHANGED: &str = r#"
<html><head>
<title>Totally different now - Example News</title>
</head><body>replaced body</body></html>
"#;

const ARCHIVE_URL: &str =
    "https://web.archive.org/web/20140516123456/http://www.example-news.com/story";
const ORIGINAL_URL: &str = "http://www.example-news.com/story";

#[tokio::test]
async fn archive_with_matching_original_is_live() {
    let fetch = Arc::new(
        MockFetcher::new()
            .with_page(ARCHIVE_URL, ARCHIVE_CAPTURE)
            .with_page(ORIGINAL_URL, ORIGINAL_SAME),
    );
    let record = extract_from_archive_url(fetch, &ScriptDetector, ARCHIVE_URL)
        .await
        .unwrap();

    assert_eq!(record.url_status, Some(UrlStatus::Live));
    assert_eq!(record.url.as_deref(), Some(ORIGINAL_URL));
    assert_eq!(record.archive_url.as_deref(), Some(ARCHIVE_URL));
    assert_eq!(
        record.archive_date,
        chrono::NaiveDate::from_ymd_opt(2014, 5, 16)
    );
    // The live original's fields override the capture's, including the
    // archive service's own site name.
    assert_eq!(record.authors.len(), 1);
    assert_eq!(record.authors[0].last, "Doe");
    assert_eq!(record.website.as_deref(), Some("Example News"));
}

#[tokio::test]
async fn archive_with_changed_original_is_unfit() {
    let fetch = Arc::new(
        MockFetcher::new()
            .with_page(ARCHIVE_URL, ARCHIVE_CAPTURE)
            .with_page(ORIGINAL_URL, ORIGINAL_CHANGED),
    );
    let record = extract_from_archive_url(fetch, &ScriptDetector, ARCHIVE_URL)
        .await
        .unwrap();

    assert_eq!(record.url_status, Some(UrlStatus::Unfit));
    // Archive fields are retained; the changed original contributes nothing.
    assert!(record.authors.is_empty());
    assert_eq!(
        record.title.as_deref(),
        Some("Old story headline - Example News")
    );
}

#[tokio::test]
async fn archive_with_dead_original() {
    let fetch = Arc::new(MockFetcher::new().with_page(ARCHIVE_URL, ARCHIVE_CAPTURE));
    let record = extract_from_archive_url(fetch, &ScriptDetector, ARCHIVE_URL)
        .await
        .unwrap();

    assert_eq!(record.url_status, Some(UrlStatus::Dead));
    assert_eq!(record.archive_url.as_deref(), Some(ARCHIVE_URL));
    assert_eq!(record.url.as_deref(), Some(ORIGINAL_URL));
    // The archive service's site name is replaced with the original
    // URL's bare hostname.
    assert_eq!(record.website.as_deref(), Some("example-news.com"));
}

#[tokio::test]
async fn plain_url_passed_to_archive_entry_degrades_gracefully() {
    let fetch = Arc::new(MockFetcher::new().with_page(ORIGINAL_URL, ORIGINAL_SAME));
    let record = extract_from_archive_url(fetch, &ScriptDetector, ORIGINAL_URL)
        .await
        .unwrap();
    // Not an archive URL: ordinary extraction, no archive fields.
    assert_eq!(record.archive_url, None);
    assert_eq!(record.url_status, None);
}
