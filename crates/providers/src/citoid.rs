//! The generalist bibliographic source — a Citoid-style REST service.
//!
//! `GET {base}/{isbn}` answers a JSON array whose first element is the
//! citation item. Field names follow the mediawiki citation format
//! (`itemType`, `ISBN`, `oclc`, `author` as `[first, last]` pairs, ...).

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use citeforge_config::AppConfig;
use citeforge_core::fetch::Fetch;
use citeforge_core::name::Name;
use citeforge_core::record::{DateValue, Record};

use crate::isbn::normalize;
use crate::source::BibSource;

pub struct CitoidSource {
    fetch: Arc<dyn Fetch>,
    base_url: String,
}

impl CitoidSource {
    pub fn new(fetch: Arc<dyn Fetch>, config: &AppConfig) -> Self {
        Self {
            fetch,
            base_url: config.sources.citoid_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn citation_url(&self, isbn: &str) -> String {
        format!("{}/{}", self.base_url, normalize(isbn))
    }
}

#[async_trait]
impl BibSource for CitoidSource {
    fn name(&self) -> &str {
        "citoid"
    }

    async fn lookup(&self, isbn: &str) -> Option<Record> {
        let url = self.citation_url(isbn);
        let doc = match self.fetch.fetch(&url).await {
            Ok(doc) => doc,
            Err(error) => {
                debug!(%url, %error, "citoid fetch failed");
                return None;
            }
        };
        parse_citation(&doc.text)
    }
}

/// Parse the service's JSON payload into a record. Item type and title are
/// required; everything else degrades silently.
fn parse_citation(json_text: &str) -> Option<Record> {
    let payload: Value = serde_json::from_str(json_text).ok()?;
    let item = payload.get(0)?;

    let mut record = Record::new();
    record.cite_type = Some(item.get("itemType")?.as_str()?.to_string());
    record.title = Some(item.get("title")?.as_str()?.to_string());
    record.isbn = item
        .get("ISBN")
        .and_then(|v| v.get(0))
        .and_then(Value::as_str)
        .map(str::to_string);
    // The WorldCat URL is not needed: the OCLC parameter recreates it.
    record.oclc = item.get("oclc").and_then(Value::as_str).map(str::to_string);

    let mut names = name_pairs(item.get("author"));
    names.extend(name_pairs(item.get("contributor")));
    record.authors = names;

    record.publisher = item.get("publisher").and_then(Value::as_str).map(str::to_string);
    record.publisher_location = item.get("place").and_then(Value::as_str).map(str::to_string);
    record.date = item
        .get("date")
        .and_then(Value::as_str)
        .map(|d| DateValue::Raw(d.to_string()));
    record.language = item.get("language").and_then(Value::as_str).map(str::to_string);
    Some(record)
}

/// Contributor arrays are `[first, last]` pairs; an empty firstname marks
/// an organization.
fn name_pairs(value: Option<&Value>) -> Vec<Name> {
    let Some(entries) = value.and_then(Value::as_array) else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| {
            let pair = entry.as_array()?;
            let first = pair.first()?.as_str()?.trim();
            let last = pair.get(1)?.as_str()?.trim();
            if last.is_empty() {
                return None;
            }
            Some(Name::new(first, last))
        })
        .collect()
}
