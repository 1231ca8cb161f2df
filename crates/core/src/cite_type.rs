//! The citation-type catalog.
//!
//! Providers and extractors label records with citation-type strings drawn
//! from several vocabularies (BibTeX entry types, Crossref work types,
//! PubMed item types, our own `web`/`journal` classifications). The catalog
//! folds every known label into a [`CitationKind`], which in turn maps onto
//! a [`TemplateFamily`] — the book/journal/web families get full locale
//! template support, everything else goes through the generic formatter.

use serde::{Deserialize, Serialize};

/// The bibliographic category of a work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CitationKind {
    Book,
    Journal,
    Web,
    Conference,
    Thesis,
    Report,
    TechReport,
    Generic,
}

/// Which template family renders a citation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateFamily {
    Book,
    Journal,
    Web,
    Generic,
}

impl CitationKind {
    /// Resolve a raw label through the catalog. Unknown labels yield `None`;
    /// the synthesizer logs those and falls back to [`CitationKind::Generic`].
    pub fn from_label(label: &str) -> Option<Self> {
        use CitationKind::*;
        // BibTeX entry types, Crossref work types, PubMed item types, and
        // the labels produced by our own extractors.
        Some(match label {
            "book" | "inbook" | "booklet" | "incollection" | "manual" | "book-section"
            | "monograph" | "book-track" | "book-part" | "book-set" | "book-chapter"
            | "book-series" | "edited-book" | "reference-book" => Book,
            "journal" | "article" | "journal-article" | "journal-volume" | "journal-issue"
            | "article-journal" | "Journal Article" | "jour" => Journal,
            "web" | "webpage" => Web,
            "conference" | "inproceedings" | "proceedings-article" | "proceedings" => Conference,
            "mastersthesis" | "phdthesis" | "thesis" | "dissertation" => Thesis,
            "report" | "report-series" => Report,
            "techreport" => TechReport,
            "misc" | "other" | "component" | "standard" | "standard-series"
            | "reference-entry" | "posted-content" | "dataset" => Generic,
            _ => return None,
        })
    }

    pub fn family(self) -> TemplateFamily {
        match self {
            CitationKind::Book => TemplateFamily::Book,
            CitationKind::Journal => TemplateFamily::Journal,
            CitationKind::Web => TemplateFamily::Web,
            _ => TemplateFamily::Generic,
        }
    }
}
