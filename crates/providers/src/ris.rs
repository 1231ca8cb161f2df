//! RIS (Research Information Systems) record parsing.
//!
//! WorldCat's EndNote export speaks RIS: `XX  - value` lines terminated by
//! `ER`. Only the tags with a counterpart in the record schema are mapped;
//! unknown tags are skipped.

use std::sync::LazyLock;

use regex::Regex;

use citeforge_core::name::Name;
use citeforge_core::record::{DateValue, Record};

static RIS_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z][A-Z0-9])\s{0,2}-\s?(.*)$").expect("RIS_LINE is valid")
});

/// Map an RIS reference-type tag to a citation-type label.
fn type_label(ty: &str) -> &'static str {
    match ty {
        "BOOK" => "book",
        "CHAP" => "book-chapter",
        "EBOOK" => "book",
        "JOUR" | "EJOUR" => "journal-article",
        "CONF" | "CPAPER" => "conference",
        "THES" => "thesis",
        "RPRT" => "report",
        "ELEC" | "WEB" => "web",
        _ => "other",
    }
}

/// Parse an RIS document into a record.
pub fn parse_ris(text: &str) -> Record {
    let mut record = Record::new();
    let mut first_page: Option<String> = None;
    let mut last_page: Option<String> = None;
    let mut serial_number: Option<String> = None;

    for line in text.lines() {
        let line = line.trim_end_matches('\r');
        let Some(caps) = RIS_LINE.captures(line) else {
            continue;
        };
        let tag = &caps[1];
        let value = caps[2].trim();
        if tag == "ER" {
            break;
        }
        if value.is_empty() {
            continue;
        }
        match tag {
            "TY" => record.cite_type = Some(type_label(value).to_string()),
            "AU" | "A1" => record.authors.push(contributor(value)),
            "A2" | "ED" => record.editors.push(contributor(value)),
            "A4" => record.translators.push(contributor(value)),
            "TI" | "T1" => record.title = Some(value.to_string()),
            "T2" | "JO" | "JF" | "J2" => record.journal = Some(value.to_string()),
            "BT" => record.booktitle = Some(value.to_string()),
            "T3" => record.series = Some(value.to_string()),
            "PB" => record.publisher = Some(value.to_string()),
            "CY" => record.publisher_location = Some(value.to_string()),
            "ET" => record.edition = Some(value.to_string()),
            "VL" => record.volume = Some(value.to_string()),
            "IS" => record.issue = Some(value.to_string()),
            "SP" => first_page = Some(value.to_string()),
            "EP" => last_page = Some(value.to_string()),
            "SN" => serial_number = Some(value.to_string()),
            "Y1" | "PY" | "DA" => apply_date(&mut record, value),
            "LA" => record.language = Some(value.to_string()),
            "UR" => record.url = Some(value.to_string()),
            "DO" => record.doi = Some(value.to_string()),
            _ => {}
        }
    }

    match (first_page, last_page) {
        (Some(first), Some(last)) => record.page = Some(format!("{first}\u{2013}{last}")),
        (Some(first), None) => record.page = Some(first),
        _ => {}
    }

    // SN is an ISBN for monographs and an ISSN for serials.
    if let Some(serial_number) = serial_number {
        if record.journal.is_some()
            || record.cite_type.as_deref() == Some("journal-article")
        {
            record.issn = Some(serial_number);
        } else {
            record.isbn = Some(serial_number);
        }
    }
    record
}

/// `Lastname, Firstname` contributor lines; unsplittable designations are
/// organizations.
fn contributor(value: &str) -> Name {
    Name::from_fullname(value).unwrap_or_else(|_| Name::organization(value))
}

/// RIS dates are `YYYY/MM/DD/other info`; trailing parts may be empty.
fn apply_date(record: &mut Record, value: &str) {
    let mut parts = value.split('/');
    let year = parts.next().unwrap_or_default().trim();
    if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
        return;
    }
    record.year = Some(year.to_string());
    let month: Option<u32> = parts.next().and_then(|p| p.trim().parse().ok());
    let day: Option<u32> = parts.next().and_then(|p| p.trim().parse().ok());
    if let (Some(month), Some(day)) = (month, day) {
        if let Ok(year) = year.parse::<i32>() {
            if let Some(date) = chrono::NaiveDate::from_ymd_opt(year, month, day) {
                record.date = Some(DateValue::Iso(date));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOOK_RIS: &str = "\
TY  - BOOK\r
AU  - Adams, Douglas.\r
A2  - Editor, Erin\r
TI  - The Hitchhiker's Guide to the Galaxy\r
PB  - Del Rey\r
CY  - New York\r
ET  - 1st ed.\r
SN  - 9780345391803\r
Y1  - 1995///\r
LA  - English\r
ER  - \r
";

    #[test]
    fn book_record_maps() {
        let record = parse_ris(BOOK_RIS);
        assert_eq!(record.cite_type.as_deref(), Some("book"));
        assert_eq!(record.authors.len(), 1);
        assert_eq!(record.authors[0].last, "Adams");
        assert_eq!(record.editors.len(), 1);
        assert_eq!(record.title.as_deref(), Some("The Hitchhiker's Guide to the Galaxy"));
        assert_eq!(record.publisher.as_deref(), Some("Del Rey"));
        assert_eq!(record.publisher_location.as_deref(), Some("New York"));
        assert_eq!(record.edition.as_deref(), Some("1st ed."));
        assert_eq!(record.isbn.as_deref(), Some("9780345391803"));
        assert_eq!(record.year.as_deref(), Some("1995"));
        assert_eq!(record.date, None);
        assert_eq!(record.language.as_deref(), Some("English"));
    }

    const JOURNAL_RIS: &str = "\
TY  - JOUR
AU  - Moran, Daniel W.
T1  - Motor cortical representation of speed and direction
JO  - Journal of Neurophysiology
VL  - 82
IS  - 5
SP  - 2676
EP  - 2692
SN  - 0022-3077
Y1  - 1999/11/01/
ER  -
";

    #[test]
    fn journal_record_maps() {
        let record = parse_ris(JOURNAL_RIS);
        assert_eq!(record.cite_type.as_deref(), Some("journal-article"));
        assert_eq!(record.journal.as_deref(), Some("Journal of Neurophysiology"));
        assert_eq!(record.volume.as_deref(), Some("82"));
        assert_eq!(record.issue.as_deref(), Some("5"));
        assert_eq!(record.page.as_deref(), Some("2676\u{2013}2692"));
        assert_eq!(record.issn.as_deref(), Some("0022-3077"));
        assert_eq!(record.year.as_deref(), Some("1999"));
        assert_eq!(
            record.date,
            Some(DateValue::Iso(chrono::NaiveDate::from_ymd_opt(1999, 11, 1).unwrap()))
        );
    }

    #[test]
    fn lines_after_er_are_ignored() {
        let record = parse_ris("TY  - BOOK\nER  - \nTI  - Ghost title\n");
        assert_eq!(record.title, None);
    }

    #[test]
    fn garbage_lines_are_skipped() {
        let record = parse_ris("not ris at all\nTI  - Real title\n");
        assert_eq!(record.title.as_deref(), Some("Real title"));
    }
}
