//! OCLC number resolution via the WorldCat record export.

use std::sync::Arc;

use citeforge_config::AppConfig;
use citeforge_core::error::IdentifierError;
use citeforge_core::fetch::Fetch;
use citeforge_core::record::Record;

use crate::ris::parse_ris;

/// Resolve an OCLC number into a bibliographic record.
///
/// The export endpoint answers RIS for valid numbers and an HTML error page
/// otherwise; the latter surfaces as [`IdentifierError::NoData`].
pub async fn resolve_oclc(
    fetch: Arc<dyn Fetch>,
    config: &AppConfig,
    oclc: &str,
) -> Result<Record, IdentifierError> {
    let url = format!(
        "{}/{}?page=endnote&client=worldcat.org-detailed_record",
        config.sources.worldcat_base_url.trim_end_matches('/'),
        oclc
    );
    let doc = fetch.fetch(&url).await?;
    if doc.text.contains("<html") {
        // Probably an invalid OCLC number.
        return Err(IdentifierError::NoData);
    }

    let mut record = parse_ris(&doc.text);
    // WorldCat appends a period to name parts and titles.
    for name in record
        .authors
        .iter_mut()
        .chain(record.editors.iter_mut())
        .chain(record.translators.iter_mut())
    {
        name.first = trim_name_period(&name.first);
        name.last = trim_name_period(&name.last);
    }
    if let Some(title) = record.title.take() {
        record.title = Some(title.trim_end_matches('.').to_string());
    }
    record.oclc = Some(oclc.to_string());
    Ok(record)
}

/// Strip a trailing period unless the part is all-uppercase initials.
fn trim_name_period(part: &str) -> String {
    let is_initials = part.chars().any(char::is_alphabetic)
        && !part.chars().any(char::is_lowercase);
    if is_initials {
        part.to_string()
    } else {
        part.trim_end_matches('.').to_string()
    }
}
