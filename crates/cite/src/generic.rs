//! The reduced generic formatter.
//!
//! Citation types outside the book/journal/web families (conference papers,
//! theses, reports, anything unknown) are delegated here. The output is a
//! plain `{{citation}}` template with a reduced field set and an `{{sfn}}`
//! marker.

use chrono::NaiveDate;

use citeforge_core::record::{Record, UrlStatus};

use crate::{anchor, is_doi_url, wrap_ref, CitationTriple};

pub(crate) fn sfn_cit_ref(record: &Record, today: NaiveDate) -> CitationTriple {
    let mut cit = String::from("* {{citation");

    let mut sfn = String::from("{{sfn");
    if record.authors.is_empty() {
        if let Some(title) = &record.title {
            sfn.push_str(" | ");
            sfn.push_str(title);
        }
    } else {
        for name in record.authors.iter().take(4) {
            sfn.push_str(" | ");
            sfn.push_str(&name.last);
        }
    }
    if let Some(year) = &record.year {
        sfn.push_str(" | ");
        sfn.push_str(year);
    }

    for (i, name) in record.authors.iter().enumerate() {
        let ordinal = if i == 0 { String::new() } else { (i + 1).to_string() };
        if name.first.is_empty() {
            cit.push_str(&format!(" | author{ordinal}={}", name.last));
        } else {
            cit.push_str(&format!(
                " | last{ordinal}={} | first{ordinal}={}",
                name.last, name.first
            ));
        }
    }
    for (i, name) in record.editors.iter().enumerate() {
        let ordinal = if i == 0 { String::new() } else { (i + 1).to_string() };
        cit.push_str(&format!(
            " | editor-last{ordinal}={} | editor-first{ordinal}={}",
            name.last, name.first
        ));
    }

    if let Some(title) = &record.title {
        cit.push_str(" | title=");
        cit.push_str(title);
    }
    if let Some(journal) = record.journal.as_ref().or(record.container_title.as_ref()) {
        cit.push_str(" | journal=");
        cit.push_str(journal);
    } else if let Some(website) = &record.website {
        cit.push_str(" | website=");
        cit.push_str(website);
    }
    if let Some(publisher) = record.publisher.as_ref().or(record.organization.as_ref()) {
        cit.push_str(" | publisher=");
        cit.push_str(publisher);
    }
    if let Some(place) = record.address.as_ref().or(record.publisher_location.as_ref()) {
        cit.push_str(" | publication-place=");
        cit.push_str(place);
    }
    if let Some(series) = &record.series {
        cit.push_str(" | series=");
        cit.push_str(series);
    }
    if let Some(volume) = &record.volume {
        cit.push_str(" | volume=");
        cit.push_str(volume);
    }
    if let Some(issue) = record.issue.as_ref().or(record.number.as_ref()) {
        cit.push_str(" | issue=");
        cit.push_str(issue);
    }
    if let Some(date) = &record.date {
        cit.push_str(" | date=");
        cit.push_str(&date.display());
    } else if let Some(year) = &record.year {
        cit.push_str(" | year=");
        cit.push_str(year);
    }
    if let Some(isbn) = &record.isbn {
        cit.push_str(" | isbn=");
        cit.push_str(isbn);
    }
    if let Some(issn) = &record.issn {
        cit.push_str(" | issn=");
        cit.push_str(issn);
    }
    if let Some(pmid) = &record.pmid {
        cit.push_str(" | pmid=");
        cit.push_str(pmid);
    }
    if let Some(pmcid) = &record.pmcid {
        cit.push_str(" | pmc=");
        cit.push_str(pmcid);
    }
    if let Some(doi) = &record.doi {
        cit.push_str(" | doi=");
        cit.push_str(doi);
    }
    if let Some(oclc) = &record.oclc {
        cit.push_str(" | oclc=");
        cit.push_str(oclc);
    }
    let pages = record.page.as_deref();
    if let Some(pages) = pages {
        cit.push_str(" | page=");
        cit.push_str(pages);
        sfn.push_str(" | p=");
        sfn.push_str(pages);
    }

    let mut url_included = false;
    if let Some(url) = &record.url {
        if record.doi.is_none() || !is_doi_url(url) {
            cit.push_str(" | url=");
            cit.push_str(url);
            url_included = true;
        }
    }
    if let Some(archive_url) = &record.archive_url {
        cit.push_str(" | archive-url=");
        cit.push_str(archive_url);
        if let Some(archive_date) = &record.archive_date {
            cit.push_str(" | archive-date=");
            cit.push_str(&archive_date.format("%Y-%m-%d").to_string());
        }
        let status = if record.url_status == Some(UrlStatus::Dead) { "dead" } else { "live" };
        cit.push_str(" | url-status=");
        cit.push_str(status);
    }
    if let Some(language) = &record.language {
        cit.push_str(" | language=");
        cit.push_str(language);
    }

    let ref_name = anchor::ref_name(&cit);
    if url_included {
        cit.push_str(" | access-date=");
        cit.push_str(&today.format("%Y-%m-%d").to_string());
    }
    cit.push_str("}}");
    sfn.push_str("}}");

    let ref_tag = wrap_ref(&cit, &ref_name, pages, url_included, "page");
    CitationTriple { sfn, cit, ref_tag }
}

#[cfg(test)]
mod tests {
    use super::*;
    use citeforge_core::name::Name;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2014, 5, 16).unwrap()
    }

    #[test]
    fn thesis_goes_through_the_generic_template() {
        let record = Record {
            cite_type: Some("thesis".into()),
            title: Some("On the propagation of light".into()),
            authors: vec![Name::new("Jane", "Doe")],
            publisher: Some("Example University".into()),
            year: Some("2002".into()),
            ..Record::default()
        };
        let triple = sfn_cit_ref(&record, today());
        assert!(triple.cit.starts_with("* {{citation | last=Doe | first=Jane"));
        assert!(triple.cit.contains(" | title=On the propagation of light"));
        assert!(triple.cit.contains(" | publisher=Example University"));
        assert!(triple.cit.contains(" | year=2002"));
        assert_eq!(triple.sfn, "{{sfn | Doe | 2002}}");
    }

    #[test]
    fn marker_carries_pages() {
        let record = Record {
            title: Some("Report on something".into()),
            page: Some("12\u{2013}14".into()),
            ..Record::default()
        };
        let triple = sfn_cit_ref(&record, today());
        assert!(triple.sfn.contains(" | p=12\u{2013}14"));
        assert!(triple.cit.contains(" | page=12\u{2013}14"));
    }

    #[test]
    fn url_gains_access_date() {
        let record = Record {
            title: Some("A report".into()),
            url: Some("http://example.org/report".into()),
            ..Record::default()
        };
        let triple = sfn_cit_ref(&record, today());
        assert!(triple.cit.ends_with(" | access-date=2014-05-16}}"));
    }

    #[test]
    fn anonymous_marker_uses_the_title() {
        let record = Record {
            title: Some("Annual report".into()),
            year: Some("2010".into()),
            ..Record::default()
        };
        let triple = sfn_cit_ref(&record, today());
        assert_eq!(triple.sfn, "{{sfn | Annual report | 2010}}");
    }
}
