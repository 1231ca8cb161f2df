//! The Persian-wiki citation template family.
//!
//! Builds `{{یادکرد کتاب/ژورنال/وب}}` full citations with `{{پک}}` markers
//! (`{{پک/بن}}` for anonymous works). Parameter order is fixed; a missing
//! field silently omits its parameter.

use chrono::NaiveDate;

use citeforge_core::cite_type::TemplateFamily;
use citeforge_core::lang::to_two_letter_code;
use citeforge_core::name::Name;
use citeforge_core::record::{Record, UrlStatus};

use crate::{anchor, is_doi_url, wrap_ref, CitationTriple};

/// The locale's default language; matching page languages add no parameter.
const DEFAULT_LANGUAGE: &str = "fa";

const PERSIAN_DIGITS: [char; 10] = ['۰', '۱', '۲', '۳', '۴', '۵', '۶', '۷', '۸', '۹'];

fn persian_digits(n: usize) -> String {
    n.to_string()
        .chars()
        .map(|c| PERSIAN_DIGITS[c.to_digit(10).unwrap_or(0) as usize])
        .collect()
}

/// Render a name list as repeated (lastname, firstname) parameter pairs,
/// numbering the second and later entries. Organization entries use the
/// no-firstname parameter when one exists for this group.
fn names_to_params(
    names: &[Name],
    first_param: &str,
    last_param: &str,
    no_first_param: Option<&str>,
) -> String {
    let mut out = String::new();
    for (i, name) in names.iter().enumerate() {
        let ordinal = if i == 0 { String::new() } else { persian_digits(i + 1) };
        match no_first_param {
            Some(param) if name.first.is_empty() => {
                out.push_str(&format!(" | {param}{ordinal}={}", name.fullname()));
            }
            _ => {
                out.push_str(&format!(
                    " | {last_param}{ordinal}={} | {first_param}{ordinal}={}",
                    name.last, name.first
                ));
            }
        }
    }
    out
}

/// Render a name list as a single comma/"and"-joined parameter of full
/// names (translators, "and others" contributors).
fn names_joined_param(names: &[Name], param: &str) -> String {
    let mut out = format!(" | {param}=");
    for (i, name) in names.iter().enumerate() {
        if i == 0 {
            out.push_str(&name.fullname());
        } else if i == names.len() - 1 {
            out.push_str(&format!(" و {}", name.fullname()));
        } else {
            out.push_str(&format!("، {}", name.fullname()));
        }
    }
    out
}

pub(crate) fn sfn_cit_ref(
    record: &Record,
    family: TemplateFamily,
    today: NaiveDate,
) -> CitationTriple {
    let mut cit = String::from(match family {
        TemplateFamily::Book => "* {{یادکرد کتاب",
        TemplateFamily::Journal => "* {{یادکرد ژورنال",
        TemplateFamily::Web => "* {{یادکرد وب",
        TemplateFamily::Generic => unreachable!("generic records go through the generic formatter"),
    });

    let mut sfn;
    if record.authors.is_empty() {
        sfn = String::from("<ref>{{پک/بن");
    } else {
        cit.push_str(&names_to_params(
            &record.authors,
            "نام",
            "نام خانوادگی",
            Some("نویسنده"),
        ));
        sfn = String::from("<ref>{{پک");
        for name in record.authors.iter().take(4) {
            sfn.push_str(" | ");
            sfn.push_str(&name.last);
        }
    }

    if !record.editors.is_empty() {
        cit.push_str(&names_to_params(
            &record.editors,
            "نام ویراستار",
            "نام خانوادگی ویراستار",
            Some("ویراستار"),
        ));
    }
    if !record.translators.is_empty() {
        cit.push_str(&names_joined_param(&record.translators, "ترجمه"));
    }
    if !record.others.is_empty() {
        cit.push_str(&names_joined_param(&record.others, "دیگران"));
    }

    if let Some(year) = &record.year {
        sfn.push_str(" | ");
        sfn.push_str(year);
    }

    let booktitle = if family == TemplateFamily::Book {
        record.booktitle.as_ref().or(record.container_title.as_ref())
    } else {
        None
    };
    if let Some(booktitle) = booktitle {
        cit.push_str(" | عنوان=");
        cit.push_str(booktitle);
        if let Some(title) = &record.title {
            cit.push_str(" | فصل=");
            cit.push_str(title);
        }
    } else if let Some(title) = &record.title {
        cit.push_str(" | عنوان=");
        cit.push_str(title);
        sfn.push_str(" | ک=");
        sfn.push_str(title);
    }

    let journal = if family == TemplateFamily::Journal {
        record.journal.as_ref().or(record.container_title.as_ref())
    } else {
        record.journal.as_ref()
    };
    if let Some(journal) = journal {
        cit.push_str(" | ژورنال=");
        cit.push_str(journal);
    } else if let Some(website) = &record.website {
        cit.push_str(" | وبگاه=");
        cit.push_str(website);
    }

    if let Some(chapter) = &record.chapter {
        cit.push_str(" | فصل=");
        cit.push_str(chapter);
    }
    if let Some(publisher) = record.publisher.as_ref().or(record.organization.as_ref()) {
        cit.push_str(" | ناشر=");
        cit.push_str(publisher);
    }
    if let Some(address) = record.address.as_ref().or(record.publisher_location.as_ref()) {
        cit.push_str(" | مکان=");
        cit.push_str(address);
    }
    if let Some(edition) = &record.edition {
        cit.push_str(" | ویرایش=");
        cit.push_str(edition);
    }
    if let Some(series) = &record.series {
        cit.push_str(" | سری=");
        cit.push_str(series);
    }
    if let Some(volume) = &record.volume {
        cit.push_str(" | جلد=");
        cit.push_str(volume);
    }
    if let Some(issue) = record.issue.as_ref().or(record.number.as_ref()) {
        cit.push_str(" | شماره=");
        cit.push_str(issue);
    }

    if let Some(date) = &record.date {
        cit.push_str(" | تاریخ=");
        cit.push_str(&date.display());
    } else if let Some(year) = &record.year {
        cit.push_str(" | سال=");
        cit.push_str(year);
    }

    if let Some(isbn) = &record.isbn {
        cit.push_str(" | شابک=");
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
    if let Some(jstor) = &record.jstor {
        cit.push_str(&format!(" | jstor={jstor}"));
        if record.jstor_access == Some(true) {
            cit.push_str(" | jstor-access=free");
        }
    }

    let pages = record.page.as_deref();
    if family == TemplateFamily::Journal {
        if let Some(pages) = pages {
            cit.push_str(" | صفحه=");
            cit.push_str(pages);
        }
    }

    // A DOI-resolver URL would duplicate an already-cited DOI.
    let mut url_included = false;
    if let Some(url) = &record.url {
        if record.doi.is_none() || !is_doi_url(url) {
            cit.push_str(" | پیوند=");
            cit.push_str(url);
            url_included = true;
        }
    }

    if let Some(archive_url) = &record.archive_url {
        cit.push_str(" | پیوند بایگانی=");
        cit.push_str(archive_url);
        if let Some(archive_date) = &record.archive_date {
            cit.push_str(" | تاریخ بایگانی=");
            cit.push_str(&archive_date.format("%Y-%m-%d").to_string());
        }
        let dead = if record.url_status == Some(UrlStatus::Dead) {
            "آری"
        } else {
            "نه"
        };
        cit.push_str(" | پیوند مرده=");
        cit.push_str(dead);
    }

    if let Some(language) = &record.language {
        let language = to_two_letter_code(&language.to_lowercase());
        if language != DEFAULT_LANGUAGE {
            if family == TemplateFamily::Web {
                cit.push_str(" | کد زبان=");
            } else {
                cit.push_str(" | زبان=");
            }
            cit.push_str(&language);
            sfn.push_str(" | زبان=");
            sfn.push_str(&language);
        }
    }

    if let Some(pages) = pages {
        sfn.push_str(" | ص=");
        sfn.push_str(pages);
    }

    // Seed the anchor before today's date is appended, so identical
    // citations keep identical anchors across days.
    let ref_name = anchor::ref_name(&cit);
    if url_included {
        cit.push_str(" | تاریخ بازبینی=");
        cit.push_str(&today.format("%Y-%m-%d").to_string());
    }

    if pages.is_none() && family != TemplateFamily::Web {
        sfn.push_str(" | ص=");
    }

    cit.push_str("}}");
    sfn.push_str("}}\u{200F}</ref>");

    let ref_tag = wrap_ref(&cit, &ref_name, pages, url_included, "صفحه");
    CitationTriple { sfn, cit, ref_tag }
}
