//! Date-like substring recognition.
//!
//! Heterogeneous pages carry dates in several textual forms; extraction and
//! byline parsing both need "the first date-like substring of this text".
//! Recognized forms, tried leftmost-first:
//!
//! - ISO: `2014-05-16`
//! - path style: `2012/05/16` (common in article URLs)
//! - US: `May 16, 2014` / `Sept. 4, 2014`
//! - day-first: `16 May 2014`
//! - slash: `05/16/2014`
//!
//! Matches that do not form a real calendar date (month 13, day 32, wildly
//! out-of-range years) are skipped and the scan continues.

use std::ops::Range;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

const MONTHS: &str = "January|February|March|April|May|June|July|August|September|October|\
                      November|December|Jan|Feb|Mar|Apr|Jun|Jul|Aug|Sept|Sep|Oct|Nov|Dec";

static ANYDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?ix)
        \b(?P<iy>\d{{4}})-(?P<im>\d{{1,2}})-(?P<id>\d{{1,2}})
        |
        \b(?P<py>\d{{4}})/(?P<pm>\d{{1,2}})/(?P<pd>\d{{1,2}})
        |
        \b(?P<um>{MONTHS})\.?\s+(?P<ud>\d{{1,2}})(?:st|nd|rd|th)?,?\s+(?P<uy>\d{{4}})
        |
        \b(?P<dd>\d{{1,2}})(?:st|nd|rd|th)?\s+(?P<dm>{MONTHS})\.?,?\s+(?P<dy>\d{{4}})
        |
        \b(?P<sm>\d{{1,2}})/(?P<sd>\d{{1,2}})/(?P<sy>\d{{4}})
        "
    ))
    .expect("ANYDATE pattern is valid")
});

fn month_number(name: &str) -> Option<u32> {
    let prefix: String = name.chars().take(3).collect::<String>().to_ascii_lowercase();
    Some(match prefix.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    })
}

fn capture_date(caps: &regex::Captures<'_>) -> Option<NaiveDate> {
    let num = |name: &str| -> Option<u32> { caps.name(name)?.as_str().parse().ok() };
    let (year, month, day) = if caps.name("iy").is_some() {
        (num("iy")?, num("im")?, num("id")?)
    } else if caps.name("py").is_some() {
        (num("py")?, num("pm")?, num("pd")?)
    } else if caps.name("um").is_some() {
        (num("uy")?, month_number(caps.name("um")?.as_str())?, num("ud")?)
    } else if caps.name("dm").is_some() {
        (num("dy")?, month_number(caps.name("dm")?.as_str())?, num("dd")?)
    } else {
        (num("sy")?, num("sm")?, num("sd")?)
    };
    if !(1500..=2100).contains(&year) {
        return None;
    }
    NaiveDate::from_ymd_opt(year as i32, month, day)
}

/// First date-like substring of `text`, with its byte range.
pub fn any_date_span(text: &str) -> Option<(Range<usize>, NaiveDate)> {
    for caps in ANYDATE.captures_iter(text) {
        if let Some(date) = capture_date(&caps) {
            let m = caps.get(0).expect("whole-match group always present");
            return Some((m.range(), date));
        }
    }
    None
}

/// First date-like substring of `text`.
pub fn find_any_date(text: &str) -> Option<NaiveDate> {
    any_date_span(text).map(|(_, date)| date)
}
