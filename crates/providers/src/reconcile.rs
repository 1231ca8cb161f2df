//! Identifier reconciliation — multi-provider lookups and the merge rule.
//!
//! For a regional ISBN both sources are queried concurrently, each as a
//! spawned task joined before its result is read; a failing source leaves
//! its slot empty. The merge rule: no data anywhere is a failure, a single
//! record wins outright, and with two records the regional one is preferred
//! exactly when the configured output locale is the regional locale
//! (backfilling the OCLC number from the generalist record).

use std::sync::Arc;

use tracing::debug;

use citeforge_config::AppConfig;
use citeforge_core::error::IdentifierError;
use citeforge_core::fetch::Fetch;
use citeforge_core::lang::DetectLanguage;
use citeforge_core::record::Record;

use crate::citoid::CitoidSource;
use crate::isbn;
use crate::oclc::resolve_oclc;
use crate::regional::RegionalCatalog;
use crate::source::BibSource;

/// The locale whose output prefers the regional catalog's records.
const REGIONAL_LOCALE: &str = "fa";

/// Choose between the two sources' results.
pub fn combine_records(
    regional: Option<Record>,
    generalist: Option<Record>,
    locale: &str,
) -> Result<Record, IdentifierError> {
    match (regional, generalist) {
        (None, None) => Err(IdentifierError::NoData),
        (Some(regional), None) => Ok(regional),
        (None, Some(generalist)) => Ok(generalist),
        (Some(mut regional), Some(generalist)) => {
            if locale == REGIONAL_LOCALE {
                if regional.oclc.is_none() {
                    regional.oclc = generalist.oclc;
                }
                Ok(regional)
            } else {
                Ok(generalist)
            }
        }
    }
}

/// Resolve an ISBN against the configured sources.
///
/// The regional source is consulted only for regional ISBNs. Each lookup is
/// a spawned task whose single output slot is read after an explicit join.
pub async fn resolve_isbn_with_sources(
    regional: Option<Arc<dyn BibSource>>,
    generalist: Arc<dyn BibSource>,
    detect: &dyn DetectLanguage,
    locale: &str,
    text: &str,
) -> Result<Record, IdentifierError> {
    let isbn = isbn::find_isbn(text)
        .ok_or_else(|| IdentifierError::Unrecognized(text.to_string()))?;

    let regional_handle = regional
        .filter(|_| isbn::is_regional(&isbn))
        .map(|source| {
            let isbn = isbn.clone();
            tokio::spawn(async move { source.lookup(&isbn).await })
        });
    let generalist_handle = {
        let isbn = isbn.clone();
        tokio::spawn(async move { generalist.lookup(&isbn).await })
    };

    let regional_record = match regional_handle {
        Some(handle) => handle.await.ok().flatten(),
        None => None,
    };
    let generalist_record = generalist_handle.await.ok().flatten();
    if regional_record.is_none() && generalist_record.is_none() {
        debug!(%isbn, "no source returned bibliographic data");
    }

    let mut record = combine_records(regional_record, generalist_record, locale)?;
    if record.language.is_none() {
        if let Some(title) = &record.title {
            record.language = detect.detect(title);
        }
    }
    Ok(record)
}

/// Resolve an ISBN or OCLC number into a bibliographic record.
///
/// Text containing an ISBN goes through the two-source reconciliation;
/// a bare number is treated as an OCLC identifier.
pub async fn resolve_identifier(
    fetch: Arc<dyn Fetch>,
    detect: &dyn DetectLanguage,
    config: &AppConfig,
    text: &str,
) -> Result<Record, IdentifierError> {
    if isbn::find_isbn(text).is_some() {
        let regional: Arc<dyn BibSource> =
            Arc::new(RegionalCatalog::new(fetch.clone(), config));
        let generalist: Arc<dyn BibSource> = Arc::new(CitoidSource::new(fetch, config));
        return resolve_isbn_with_sources(
            Some(regional),
            generalist,
            detect,
            &config.locale,
            text,
        )
        .await;
    }
    let trimmed = text.trim();
    if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
        return resolve_oclc(fetch, config, trimmed).await;
    }
    Err(IdentifierError::Unrecognized(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use citeforge_core::lang::ScriptDetector;
    use std::sync::Mutex;

    /// A source answering a canned record, counting its calls.
    struct CannedSource {
        name: String,
        record: Option<Record>,
        calls: Mutex<usize>,
    }

    impl CannedSource {
        fn new(name: &str, record: Option<Record>) -> Self {
            Self {
                name: name.into(),
                record,
                calls: Mutex::new(0),
            }
        }

        fn calls(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl BibSource for CannedSource {
        fn name(&self) -> &str {
            &self.name
        }

        async fn lookup(&self, _isbn: &str) -> Option<Record> {
            *self.calls.lock().unwrap() += 1;
            self.record.clone()
        }
    }

    fn regional_record() -> Record {
        Record {
            title: Some("کتاب آزمایشی".into()),
            cite_type: Some("book".into()),
            language: Some("fa".into()),
            ..Record::default()
        }
    }

    fn generalist_record() -> Record {
        Record {
            title: Some("A Test Book".into()),
            cite_type: Some("book".into()),
            oclc: Some("12345".into()),
            ..Record::default()
        }
    }

    const REGIONAL_ISBN: &str = "978-964-448-564-4";
    const FOREIGN_ISBN: &str = "978-0-596-52068-7";

    #[test]
    fn both_empty_is_no_data() {
        assert!(matches!(
            combine_records(None, None, "fa"),
            Err(IdentifierError::NoData)
        ));
    }

    #[test]
    fn single_source_wins_outright() {
        let record = combine_records(Some(regional_record()), None, "en").unwrap();
        assert_eq!(record.title.as_deref(), Some("کتاب آزمایشی"));
        let record = combine_records(None, Some(generalist_record()), "fa").unwrap();
        assert_eq!(record.title.as_deref(), Some("A Test Book"));
    }

    #[test]
    fn regional_locale_prefers_regional_and_backfills_oclc() {
        let record =
            combine_records(Some(regional_record()), Some(generalist_record()), "fa").unwrap();
        assert_eq!(record.title.as_deref(), Some("کتاب آزمایشی"));
        assert_eq!(record.oclc.as_deref(), Some("12345"));
    }

    #[test]
    fn other_locales_prefer_the_generalist() {
        let record =
            combine_records(Some(regional_record()), Some(generalist_record()), "en").unwrap();
        assert_eq!(record.title.as_deref(), Some("A Test Book"));
    }

    #[tokio::test]
    async fn regional_isbn_queries_both_sources() {
        let regional = Arc::new(CannedSource::new("regional", Some(regional_record())));
        let generalist = Arc::new(CannedSource::new("generalist", Some(generalist_record())));
        let record = resolve_isbn_with_sources(
            Some(regional.clone()),
            generalist.clone(),
            &ScriptDetector,
            "fa",
            REGIONAL_ISBN,
        )
        .await
        .unwrap();
        assert_eq!(regional.calls(), 1);
        assert_eq!(generalist.calls(), 1);
        assert_eq!(record.title.as_deref(), Some("کتاب آزمایشی"));
    }

    #[tokio::test]
    async fn foreign_isbn_skips_the_regional_source() {
        let regional = Arc::new(CannedSource::new("regional", Some(regional_record())));
        let generalist = Arc::new(CannedSource::new("generalist", Some(generalist_record())));
        let record = resolve_isbn_with_sources(
            Some(regional.clone()),
            generalist.clone(),
            &ScriptDetector,
            "fa",
            FOREIGN_ISBN,
        )
        .await
        .unwrap();
        assert_eq!(regional.calls(), 0);
        assert_eq!(generalist.calls(), 1);
        assert_eq!(record.title.as_deref(), Some("A Test Book"));
    }

    #[tokio::test]
    async fn empty_sources_fail_with_no_data() {
        let regional = Arc::new(CannedSource::new("regional", None));
        let generalist = Arc::new(CannedSource::new("generalist", None));
        let result = resolve_isbn_with_sources(
            Some(regional),
            generalist,
            &ScriptDetector,
            "fa",
            REGIONAL_ISBN,
        )
        .await;
        assert!(matches!(result, Err(IdentifierError::NoData)));
    }

    #[tokio::test]
    async fn missing_language_is_detected_from_the_title() {
        let generalist = Arc::new(CannedSource::new("generalist", Some(generalist_record())));
        let record = resolve_isbn_with_sources(
            None,
            generalist,
            &ScriptDetector,
            "fa",
            FOREIGN_ISBN,
        )
        .await
        .unwrap();
        assert_eq!(record.language.as_deref(), Some("en"));
    }

    #[tokio::test]
    async fn unrecognized_text_is_an_error() {
        let generalist = Arc::new(CannedSource::new("generalist", None));
        let result = resolve_isbn_with_sources(
            None,
            generalist,
            &ScriptDetector,
            "fa",
            "not an identifier",
        )
        .await;
        assert!(matches!(result, Err(IdentifierError::Unrecognized(_))));
    }
}
