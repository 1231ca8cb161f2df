//! # Citeforge Cite
//!
//! The citation synthesizer: maps a bibliographic record and its citation
//! type onto the locale's markup triple — a short-form marker, a full
//! citation, and an inline reference tag keyed by a stable, content-derived
//! anchor name.
//!
//! Book, journal, and web records render through the locale template family
//! ([`fa`]); every other type delegates to the reduced generic formatter
//! ([`generic`]). Unknown type labels are logged and treated as generic.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use tracing::warn;

use citeforge_core::cite_type::{CitationKind, TemplateFamily};
use citeforge_core::record::Record;

pub mod anchor;
mod fa;
mod generic;

/// The synthesized markup triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitationTriple {
    /// Short-form in-text marker.
    pub sfn: String,
    /// Full bibliographic citation.
    pub cit: String,
    /// Inline reference tag wrapping the citation payload.
    pub ref_tag: String,
}

static DOI_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https?://(?:dx\.|www\.)?doi\.org/").expect("DOI_URL is valid")
});

/// Whether a URL points at a DOI resolver.
pub(crate) fn is_doi_url(url: &str) -> bool {
    DOI_URL.is_match(url)
}

/// Wrap the full citation (minus its `* ` marker prefix) into a reference
/// tag. A page number not already embedded is injected before closing;
/// a citation without pages or a URL closes with an empty page parameter.
pub(crate) fn wrap_ref(
    cit: &str,
    ref_name: &str,
    pages: Option<&str>,
    url_included: bool,
    page_param: &str,
) -> String {
    let mut payload = cit.strip_prefix("* ").unwrap_or(cit).to_string();
    let embedded = format!(" | {page_param}=");
    if let Some(pages) = pages {
        if !payload.contains(&embedded) {
            payload = format!("{}{embedded}{pages}}}}}", &payload[..payload.len() - 2]);
        }
    } else if !url_included {
        payload = format!("{}{embedded}}}}}", &payload[..payload.len() - 2]);
    }
    format!("<ref name=\"{ref_name}\">{payload}\u{200F}</ref>")
}

/// Synthesize the citation triple for a record.
///
/// `today` is the retrieval date recorded for cited URLs; passing it in
/// keeps synthesis deterministic for testing.
pub fn synthesize(record: &Record, today: NaiveDate) -> CitationTriple {
    let kind = match record.cite_type.as_deref() {
        Some(label) => CitationKind::from_label(label).unwrap_or_else(|| {
            warn!(label, "unknown citation type, falling back to generic");
            CitationKind::Generic
        }),
        None => {
            warn!("record carries no citation type, falling back to generic");
            CitationKind::Generic
        }
    };
    match kind.family() {
        TemplateFamily::Generic => generic::sfn_cit_ref(record, today),
        family => fa::sfn_cit_ref(record, family, today),
    }
}
