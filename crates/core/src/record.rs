//! The bibliographic record — a fixed schema of optional fields.
//!
//! A [`Record`] is built once per request, populated additively as the
//! extractors run, and consumed exactly once by the synthesizer. Absent and
//! never-set are the same thing: every lookup is an `Option`, never an error.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::name::Name;

/// A publication date as extracted or as delivered by a provider.
///
/// Extraction produces calendar dates; some providers hand back strings that
/// are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateValue {
    Iso(NaiveDate),
    Raw(String),
}

impl DateValue {
    /// The four-digit year, when one can be derived.
    pub fn year(&self) -> Option<String> {
        match self {
            DateValue::Iso(date) => Some(date.year().to_string()),
            DateValue::Raw(_) => None,
        }
    }

    /// Render for citation output: ISO format for calendar dates, the
    /// original text for raw strings.
    pub fn display(&self) -> String {
        match self {
            DateValue::Iso(date) => date.format("%Y-%m-%d").to_string(),
            DateValue::Raw(raw) => raw.clone(),
        }
    }
}

/// Outcome of archive reconciliation for the original URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlStatus {
    /// The original URL still serves the captured content.
    Live,
    /// The original URL could not be fetched.
    Dead,
    /// The original URL answers but its content no longer matches the capture.
    Unfit,
}

/// The field bag for one bibliographic work.
///
/// Fields mirror the citation parameter vocabulary. Name lists are ordered;
/// an empty list means "no value".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub title: Option<String>,
    /// Raw `<title>` tag content, kept for archive reconciliation.
    pub html_title: Option<String>,
    pub booktitle: Option<String>,
    pub container_title: Option<String>,
    pub chapter: Option<String>,
    pub journal: Option<String>,
    pub website: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<Name>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub editors: Vec<Name>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub translators: Vec<Name>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub others: Vec<Name>,

    pub publisher: Option<String>,
    pub organization: Option<String>,
    pub address: Option<String>,
    pub publisher_location: Option<String>,
    pub edition: Option<String>,
    pub series: Option<String>,
    pub volume: Option<String>,
    pub issue: Option<String>,
    pub number: Option<String>,
    pub page: Option<String>,

    pub year: Option<String>,
    pub date: Option<DateValue>,

    pub isbn: Option<String>,
    pub issn: Option<String>,
    pub doi: Option<String>,
    pub pmid: Option<String>,
    pub pmcid: Option<String>,
    pub oclc: Option<String>,
    pub jstor: Option<String>,
    /// Open-access flag for the JSTOR id.
    pub jstor_access: Option<bool>,

    pub url: Option<String>,
    pub archive_url: Option<String>,
    pub archive_date: Option<NaiveDate>,
    pub url_status: Option<UrlStatus>,

    /// Two-letter language code.
    pub language: Option<String>,

    /// Raw citation-type label; resolved through the catalog at synthesis.
    pub cite_type: Option<String>,
}

macro_rules! merge_options {
    ($self:ident, $other:ident, $($field:ident),+ $(,)?) => {
        $(
            if $other.$field.is_some() {
                $self.$field = $other.$field;
            }
        )+
    };
}

macro_rules! merge_lists {
    ($self:ident, $other:ident, $($field:ident),+ $(,)?) => {
        $(
            if !$other.$field.is_empty() {
                $self.$field = $other.$field;
            }
        )+
    };
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay every populated field of `other` onto `self`.
    ///
    /// Used by archive reconciliation when the live original is trusted:
    /// its fields override the archived capture's, while fields the original
    /// extraction never produced stay as captured.
    pub fn merge_from(&mut self, other: Record) {
        merge_options!(
            self, other, title, html_title, booktitle, container_title, chapter, journal,
            website, publisher, organization, address, publisher_location, edition, series,
            volume, issue, number, page, year, date, isbn, issn, doi, pmid, pmcid, oclc,
            jstor, jstor_access, url, archive_url, archive_date, url_status, language,
            cite_type,
        );
        merge_lists!(self, other, authors, editors, translators, others);
    }

    /// Set `date` and derive `year` when possible.
    pub fn set_date(&mut self, date: NaiveDate) {
        self.year = Some(date.year().to_string());
        self.date = Some(DateValue::Iso(date));
    }
}
