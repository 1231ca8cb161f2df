//! # Citeforge Providers
//!
//! Bibliographic record providers for identifier lookups: the regional book
//! catalog, the generalist Citoid-style REST service, and the WorldCat RIS
//! export for OCLC numbers — plus the reconciliation logic that merges or
//! chooses between them.

pub mod citoid;
pub mod isbn;
pub mod oclc;
pub mod reconcile;
pub mod regional;
pub mod ris;
pub mod source;

pub use citoid::CitoidSource;
pub use oclc::resolve_oclc;
pub use reconcile::{combine_records, resolve_identifier, resolve_isbn_with_sources};
pub use regional::RegionalCatalog;
pub use ris::parse_ris;
pub use source::BibSource;
