//! Wayback Machine capture reconciliation.
//!
//! An archive capture URL yields two extractions: the capture itself and,
//! concurrently, the original URL. When the original still serves the same
//! content (titles agree) its fields are trusted and override the capture's;
//! otherwise the capture's fields are kept and the `url-status` field
//! records why.

use std::sync::LazyLock;
use std::sync::Arc;

use chrono::NaiveDate;
use regex::Regex;
use tracing::debug;

use citeforge_core::error::ExtractError;
use citeforge_core::fetch::Fetch;
use citeforge_core::lang::DetectLanguage;
use citeforge_core::record::{Record, UrlStatus};

use crate::meta;
use crate::page::{extract_from_url, reduced_record};

/// Timestamped capture URLs of web.archive.org, including the beta host and
/// the resource-type modifiers (`id_`, `im_`, `js_`, `cs_`).
static ARCHIVE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^https?://web(?:-beta)?\.archive\.org/(?:web/)?",
        r"(?P<year>\d{4})(?P<month>\d{2})(?P<day>\d{2})\d{6}",
        r"(?:cs_|i(?:d_|m_)|js_)?/(?P<original>http.*)$",
    ))
    .expect("ARCHIVE_URL is valid")
});

/// Extract a bibliographic record from a Wayback Machine capture URL.
///
/// URLs not matching the capture pattern degrade to ordinary extraction.
/// Reconciliation failures never raise; they only degrade the `url-status`
/// field.
pub async fn extract_from_archive_url(
    fetch: Arc<dyn Fetch>,
    detect: &dyn DetectLanguage,
    archive_url: &str,
) -> Result<Record, ExtractError> {
    let Some((capture_date, original_url)) = parse_archive_url(archive_url) else {
        return extract_from_url(fetch, detect, archive_url).await;
    };

    let original_handle = {
        let fetch = fetch.clone();
        let original_url = original_url.clone();
        tokio::spawn(async move {
            match reduced_record(fetch, &original_url).await {
                Ok(record) => Some(record),
                Err(error) => {
                    debug!(url = %original_url, %error, "original URL extraction failed");
                    None
                }
            }
        })
    };

    let mut record = extract_from_url(fetch, detect, archive_url).await?;
    record.url = Some(original_url.clone());
    record.archive_url = Some(archive_url.to_string());
    record.archive_date = Some(capture_date);

    match original_handle.await {
        Ok(Some(original))
            if original.title == record.title || original.html_title == record.html_title =>
        {
            record.merge_from(original);
            record.url_status = Some(UrlStatus::Live);
        }
        Ok(Some(_)) => {
            // The content has probably changed since the capture; the
            // original data cannot be trusted.
            record.url_status = Some(UrlStatus::Unfit);
        }
        _ => {
            record.url_status = Some(UrlStatus::Dead);
        }
    }

    if record.website.as_deref() == Some("Wayback Machine") {
        record.website = meta::hostname(&original_url);
    }
    Ok(record)
}

/// Parse `(capture_date, original_url)` out of a timestamped capture URL.
fn parse_archive_url(archive_url: &str) -> Option<(NaiveDate, String)> {
    let caps = ARCHIVE_URL.captures(archive_url)?;
    let year: i32 = caps["year"].parse().ok()?;
    let month: u32 = caps["month"].parse().ok()?;
    let day: u32 = caps["day"].parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    Some((date, caps["original"].to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_url_parses() {
        let (date, original) = parse_archive_url(
            "https://web.archive.org/web/20140516123456/http://www.ft.com/cms/s/ea29ffb6",
        )
        .unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2014, 5, 16).unwrap());
        assert_eq!(original, "http://www.ft.com/cms/s/ea29ffb6");
    }

    #[test]
    fn beta_host_and_modifier_accepted() {
        assert!(parse_archive_url(
            "http://web-beta.archive.org/web/20140516123456id_/http://example.com/a"
        )
        .is_some());
        assert!(parse_archive_url(
            "https://web.archive.org/20140516123456im_/https://example.com/img"
        )
        .is_some());
    }

    #[test]
    fn non_archive_urls_rejected() {
        assert!(parse_archive_url("http://www.ft.com/cms/s/ea29ffb6").is_none());
        assert!(parse_archive_url("https://web.archive.org/web/garbage/http://x").is_none());
    }

    #[test]
    fn impossible_timestamp_rejected() {
        assert!(parse_archive_url(
            "https://web.archive.org/web/20141356123456/http://example.com/a"
        )
        .is_none());
    }
}
