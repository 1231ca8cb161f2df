//! Error types for the citeforge domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all citeforge operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Fetch errors ---
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    // --- Extraction errors ---
    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    // --- Identifier resolution errors ---
    #[error("Identifier error: {0}")]
    Identifier(#[from] IdentifierError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failure kinds of the document-fetch capability.
///
/// Each kind is distinct and non-fatal to the overall pipeline: per-source
/// fetch failures degrade extraction instead of aborting it. Only a failed
/// fetch of a directly-requested URL surfaces to the caller.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("Unexpected response status: {0}")]
    InvalidStatus(u16),

    #[error("Invalid content-type: {0} (URL content is supposed to be text)")]
    ContentType(String),

    #[error("Content too long: {0} bytes")]
    ContentLength(u64),

    #[error("Transport error: {0}")]
    Transport(String),
}

/// Errors raised by the URL extraction entry points.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The directly-requested document could not be fetched.
    #[error("Could not fetch the requested document: {0}")]
    Fetch(#[from] FetchError),
}

/// Errors raised by ISBN/OCLC identifier resolution.
#[derive(Debug, Error)]
pub enum IdentifierError {
    /// No provider returned any bibliographic data.
    #[error("Bibliographic information not found")]
    NoData,

    /// The input text contains neither an ISBN nor an OCLC number.
    #[error("Not a recognizable ISBN or OCLC number: {0}")]
    Unrecognized(String),

    /// The sole provider for this identifier could not be reached.
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),
}
