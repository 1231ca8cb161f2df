//! # Citeforge Core
//!
//! Domain types, capability traits, and error definitions for the citeforge
//! bibliographic extraction and citation synthesis pipeline. This crate
//! defines the domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! External capabilities (HTTP fetching, language classification) are defined
//! as traits here. Implementations live in their respective crates. This
//! enables:
//! - Swapping implementations via configuration
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod cite_type;
pub mod date;
pub mod error;
pub mod fetch;
pub mod lang;
pub mod name;
pub mod record;
pub mod text;

// Re-export key types at crate root for ergonomics
pub use cite_type::{CitationKind, TemplateFamily};
pub use date::{any_date_span, find_any_date};
pub use error::{Error, ExtractError, FetchError, IdentifierError, Result};
pub use fetch::{Document, Fetch};
pub use lang::{DetectLanguage, ScriptDetector};
pub use name::{InvalidName, Name};
pub use record::{DateValue, Record, UrlStatus};
pub use text::{strip_tags, title_tag, unescape_html};
