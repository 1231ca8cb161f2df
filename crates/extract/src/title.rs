//! Title decomposition — separating the page title into author, pure title,
//! and site name.
//!
//! Real-world `<title>` strings bundle the article title with the site name
//! and sometimes the author, joined by dashes or pipes. The site-name
//! segment is identified against the URL hostname first, then fuzzily, then
//! against the homepage title; tie-break order is part of the contract.

use std::sync::LazyLock;

use regex::Regex;

use citeforge_core::name::Name;

use crate::meta::hostname;

/// Segment similarity threshold for fuzzy site-name matching.
/// Low on purpose: "BBC - Homepage" still has to match a localized
/// "BBC فارسی" hostname segment.
const SIMILARITY_CUTOFF: f64 = 0.3;

static SEGMENT_SEP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(" - | \u{2014} |\\|").expect("SEGMENT_SEP is valid"));

/// Decompose `title` into `(intitle_author, pure_title, intitle_sitename)`.
///
/// A single-segment title is returned unchanged with no site name. The
/// chosen site-name and author segments are removed and the remaining
/// segments are rejoined with `" - "`.
pub fn parse_title(
    title: &str,
    url: &str,
    authors: Option<&[Name]>,
    home_title: Option<&str>,
) -> (Option<String>, String, Option<String>) {
    let mut segments: Vec<&str> = SEGMENT_SEP
        .split(title.trim())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if segments.len() <= 1 {
        return (None, title.to_string(), None);
    }

    let host = hostname(url).unwrap_or_default();
    let intitle_sitename = find_sitename_segment(&segments, &host, home_title);
    if let Some(ref sitename) = intitle_sitename {
        if let Some(pos) = segments.iter().position(|s| *s == sitename.as_str()) {
            segments.remove(pos);
        }
    }

    let mut intitle_author = None;
    if let Some(authors) = authors {
        for author in authors {
            let last = author.last.to_lowercase();
            if last.is_empty() {
                continue;
            }
            if let Some(segment) = segments
                .iter()
                .find(|s| s.to_lowercase().contains(&last))
            {
                intitle_author = Some(segment.to_string());
            }
        }
    }
    if let Some(ref author_segment) = intitle_author {
        if let Some(pos) = segments.iter().position(|s| *s == author_segment.as_str()) {
            segments.remove(pos);
        }
    }

    (intitle_author, segments.join(" - "), intitle_sitename)
}

/// Pick the segment naming the site, by the fixed tie-break order:
/// hostname containment / token subset, fuzzy hostname similarity,
/// homepage-title containment, fuzzy homepage-title similarity.
fn find_sitename_segment(
    segments: &[&str],
    host: &str,
    home_title: Option<&str>,
) -> Option<String> {
    if !host.is_empty() {
        let host_tokens: Vec<&str> = host.split('.').collect();
        for segment in segments {
            let lowered = segment.to_lowercase();
            let tokens: Vec<&str> = lowered.split_whitespace().collect();
            let tokens_in_host =
                !tokens.is_empty() && tokens.iter().all(|token| host_tokens.contains(token));
            if host.contains(*segment) || tokens_in_host {
                return Some(segment.to_string());
            }
        }
        if let Some(best) = closest_match(host, segments) {
            return Some(best);
        }
    }
    let home_title = home_title.unwrap_or_default();
    if !home_title.is_empty() {
        for segment in segments {
            if home_title.contains(*segment) {
                return Some(segment.to_string());
            }
        }
        if let Some(best) = closest_match(home_title, segments) {
            return Some(best);
        }
    }
    None
}

/// Best fuzzy match of `target` among `candidates`, above the cutoff.
fn closest_match(target: &str, candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .map(|c| (strsim::sorensen_dice(target, c), *c))
        .filter(|(score, _)| *score >= SIMILARITY_CUTOFF)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, c)| c.to_string())
}
