//! Person and organization names.
//!
//! A [`Name`] is a (firstname, lastname) pair. Organizations are represented
//! with an empty firstname and the whole designation in the lastname field.
//!
//! [`Name::from_fullname`] is the confidence-gated split heuristic used by
//! byline parsing: when a free-text segment cannot be confidently split into
//! first and last parts it fails with [`InvalidName`] and the caller discards
//! the segment.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A free-text segment could not be split into (first, last) parts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cannot split into first and last name: {0:?}")]
pub struct InvalidName(pub String);

/// A person or organization name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name {
    /// Given name. Empty for organization-as-author entries.
    pub first: String,

    /// Family name, or the full designation for organizations.
    pub last: String,
}

/// Segments longer than this are never a personal name.
const MAX_FULLNAME_LEN: usize = 40;

impl Name {
    pub fn new(first: impl Into<String>, last: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            last: last.into(),
        }
    }

    /// An organization entry: empty firstname, everything in the lastname.
    pub fn organization(designation: impl Into<String>) -> Self {
        Self {
            first: String::new(),
            last: designation.into(),
        }
    }

    /// Split a free-text fullname into (first, last) at the last internal
    /// whitespace. `Jr.`/`Sr.` suffixes ride with the firstname.
    ///
    /// Fails when the segment is empty, a single token, overlong, or
    /// contains a digit — the byline parser discards such segments.
    pub fn from_fullname(fullname: &str) -> Result<Self, InvalidName> {
        let trimmed = fullname.trim();
        if trimmed.is_empty()
            || trimmed.chars().count() > MAX_FULLNAME_LEN
            || trimmed.contains(|c: char| c.is_ascii_digit())
        {
            return Err(InvalidName(fullname.into()));
        }
        // "Lastname, Firstname" convention used by scholarly meta tags.
        if let Some((last, first)) = trimmed.split_once(", ") {
            let (first, last) = (first.trim(), last.trim());
            if !first.is_empty() && !last.is_empty() && !first.contains(',') {
                return Ok(Self {
                    first: first.into(),
                    last: last.into(),
                });
            }
            return Err(InvalidName(fullname.into()));
        }
        let mut tokens: Vec<&str> = trimmed.split_whitespace().collect();
        if tokens.len() < 2 {
            return Err(InvalidName(fullname.into()));
        }
        let mut suffix = None;
        if tokens.len() > 2 {
            let tail = tokens[tokens.len() - 1];
            if matches!(
                tail.trim_end_matches('.').to_ascii_lowercase().as_str(),
                "jr" | "sr"
            ) {
                suffix = tokens.pop();
            }
        }
        let last = tokens.pop().map(str::to_owned).unwrap_or_default();
        let mut first = tokens.join(" ");
        if let Some(suffix) = suffix {
            first.push(' ');
            first.push_str(suffix);
        }
        Ok(Self { first, last })
    }

    /// Whether this entry stands for an organization rather than a person.
    pub fn is_organization(&self) -> bool {
        self.first.is_empty()
    }

    /// Display form: `"first last"`, or the lastname alone for organizations.
    pub fn fullname(&self) -> String {
        if self.first.is_empty() {
            self.last.clone()
        } else {
            format!("{} {}", self.first, self.last)
        }
    }
}
