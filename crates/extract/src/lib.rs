//! # Citeforge Extract
//!
//! Field-extraction heuristics over raw HTML: pattern-chain scanners for
//! scholarly meta fields, title/site-name/byline decomposition, and the
//! URL and archive-capture entry points.
//!
//! The heuristics are ordered lists of independent pattern candidates
//! composed first-match-wins; their order is part of each field's contract
//! and is documented per module.

pub mod archive;
pub mod authors;
pub mod meta;
pub mod page;
pub mod pattern;
pub mod title;

pub use archive::extract_from_archive_url;
pub use authors::{byline_to_names, find_authors};
pub use page::{extract_from_url, find_site_name, find_title};
pub use title::parse_title;
