//! The URL extraction entry point.
//!
//! Fetches a document and runs the per-field extractors over it in a fixed
//! order. The homepage title (used by site-name resolution) is fetched by a
//! concurrent task that is joined exactly once, before any consumer reads
//! its slot; its failure only degrades site-name resolution.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::debug;
use url::Url;

use citeforge_core::error::ExtractError;
use citeforge_core::fetch::Fetch;
use citeforge_core::lang::DetectLanguage;
use citeforge_core::name::Name;
use citeforge_core::record::Record;
use citeforge_core::text::strip_tags;

use crate::authors::find_authors;
use crate::meta;
use crate::title::parse_title;

/// Extract a bibliographic record from an arbitrary URL.
///
/// Fetch failures for the directly-requested document surface to the
/// caller; every per-field miss is a silent `None`.
pub async fn extract_from_url(
    fetch: Arc<dyn Fetch>,
    detect: &dyn DetectLanguage,
    url: &str,
) -> Result<Record, ExtractError> {
    let home_handle = spawn_home_title(fetch.clone(), url);
    let doc = fetch.fetch(url).await?;
    let html = &doc.text;

    let mut record = Record::new();
    record.url = Some(meta::find_url(html, url));
    let html_title = meta::title_tag(html);
    record.html_title = html_title.clone();
    let authors = find_authors(html).unwrap_or_default();
    record.authors = authors.clone();
    record.issn = meta::find_issn(html);
    record.pmid = meta::find_pmid(html);
    record.doi = meta::find_doi(html);
    record.volume = meta::find_volume(html);
    record.issue = meta::find_issue(html);
    record.page = meta::find_pages(html);
    record.journal = meta::find_journal(html);

    let home_title = join_home_title(home_handle).await;

    if record.journal.is_some() {
        record.cite_type = Some("journal".into());
    } else {
        record.cite_type = Some("web".into());
        record.website = Some(find_site_name(
            html,
            html_title.as_deref(),
            url,
            &authors,
            home_title.as_deref(),
        ));
    }
    record.title = find_title(html, html_title.as_deref(), url, &authors, home_title.as_deref());
    if let Some(date) = meta::find_date(html, url) {
        record.set_date(date);
    }
    record.language = detect.detect(&strip_tags(html));
    Ok(record)
}

/// Reduced extraction used for the original URL during archive
/// reconciliation: title, authors, and the journal/website classification
/// only.
pub(crate) async fn reduced_record(
    fetch: Arc<dyn Fetch>,
    url: &str,
) -> Result<Record, ExtractError> {
    let home_handle = spawn_home_title(fetch.clone(), url);
    let doc = fetch.fetch(url).await?;
    let html = &doc.text;

    let mut record = Record::new();
    let html_title = meta::title_tag(html);
    record.html_title = html_title.clone();
    let authors = find_authors(html).unwrap_or_default();
    record.authors = authors.clone();
    record.journal = meta::find_journal(html);

    let home_title = join_home_title(home_handle).await;

    if record.journal.is_some() {
        record.cite_type = Some("journal".into());
    } else {
        record.cite_type = Some("web".into());
        record.website = Some(find_site_name(
            html,
            html_title.as_deref(),
            url,
            &authors,
            home_title.as_deref(),
        ));
    }
    record.title = find_title(html, html_title.as_deref(), url, &authors, home_title.as_deref());
    Ok(record)
}

/// Document title: the dedicated meta field first, else the `<title>` tag,
/// both decomposed through [`parse_title`].
pub fn find_title(
    html: &str,
    html_title: Option<&str>,
    url: &str,
    authors: &[Name],
    home_title: Option<&str>,
) -> Option<String> {
    if let Some(meta_title) = meta::find_title_meta(html) {
        return Some(parse_title(&meta_title, url, Some(authors), home_title).1);
    }
    html_title.map(|t| parse_title(t, url, Some(authors), home_title).1)
}

/// Site name, in priority order: `og:site_name`, the in-title site name,
/// derivations from the homepage title, and finally the bare hostname.
pub fn find_site_name(
    html: &str,
    html_title: Option<&str>,
    url: &str,
    authors: &[Name],
    home_title: Option<&str>,
) -> String {
    if let Some(name) = meta::find_og_site_name(html) {
        return name;
    }
    if let Some(html_title) = html_title {
        let (_, _, sitename) = parse_title(html_title, url, Some(authors), home_title);
        if let Some(name) = sitename {
            return name;
        }
    }
    if let Some(home_title) = home_title {
        if let Some((prefix, _)) = home_title.split_once(':') {
            let prefix = prefix.trim();
            if !prefix.is_empty() {
                return prefix.to_string();
            }
        }
        let (_, _, sitename) = parse_title(home_title, url, None, None);
        if let Some(name) = sitename {
            return name;
        }
        return home_title.to_string();
    }
    meta::hostname(url).unwrap_or_else(|| url.to_string())
}

/// Dispatch the homepage-title fetch as a concurrent task.
fn spawn_home_title(fetch: Arc<dyn Fetch>, url: &str) -> JoinHandle<Option<String>> {
    let home_url = homepage_url(url);
    tokio::spawn(async move {
        let home_url = home_url?;
        match fetch.fetch(&home_url).await {
            Ok(doc) => meta::title_tag(&doc.text),
            Err(error) => {
                debug!(url = %home_url, %error, "homepage title fetch failed");
                None
            }
        }
    })
}

/// Join the homepage-title task; a failed or panicked task leaves the slot
/// empty.
async fn join_home_title(handle: JoinHandle<Option<String>>) -> Option<String> {
    handle.await.ok().flatten()
}

fn homepage_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    Some(format!("{}://{}", parsed.scheme(), parsed.host_str()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn homepage_url_is_scheme_and_host() {
        assert_eq!(
            homepage_url("http://news.bbc.co.uk/2/hi/health/3679313.stm").as_deref(),
            Some("http://news.bbc.co.uk")
        );
        assert_eq!(homepage_url("not a url"), None);
    }

    #[test]
    fn site_name_prefers_og_meta() {
        let html = r#"<meta property="og:site_name" content="USA TODAY">"#;
        assert_eq!(
            find_site_name(html, Some("A story - usatoday.com"), "https://www.usatoday.com/story/1", &[], None),
            "USA TODAY"
        );
    }

    #[test]
    fn site_name_from_title_segments() {
        assert_eq!(
            find_site_name(
                "<html></html>",
                Some("Rockhopper raises Falklands oil estimate - FT.com"),
                "http://www.ft.com/cms/s/ea29ffb6",
                &[],
                None,
            ),
            "FT.com"
        );
    }

    #[test]
    fn site_name_from_home_title_colon_prefix() {
        assert_eq!(
            find_site_name(
                "<html></html>",
                Some("One segment only"),
                "http://www.washingtonpost.com/wp-dyn/content/article/2005/09/02/AR2005090200822.html",
                &[],
                Some("Washington Post: Breaking News, World, US, DC News"),
            ),
            "Washington Post"
        );
    }

    #[test]
    fn site_name_falls_back_to_hostname() {
        assert_eq!(
            find_site_name("<html></html>", None, "http://www.example.org/story", &[], None),
            "example.org"
        );
    }
}
