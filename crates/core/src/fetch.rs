//! Fetch capability — the abstraction over document retrieval.
//!
//! The pipeline never talks HTTP directly; it asks a [`Fetch`] implementation
//! for the decoded text of a URL. Transport concerns (timeouts, redirects,
//! charset detection) belong to the implementation. Failure kinds are
//! classified by [`FetchError`](crate::error::FetchError) so orchestration
//! code can degrade per-source instead of aborting.
//!
//! Implementations: the reqwest-backed client in `citeforge-transport`,
//! mock fetchers in tests.

use async_trait::async_trait;

use crate::error::FetchError;

/// A fetched document, already decoded to text.
#[derive(Debug, Clone)]
pub struct Document {
    /// The URL the document was requested from.
    pub url: String,

    /// Decoded body text.
    pub text: String,
}

impl Document {
    pub fn new(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            text: text.into(),
        }
    }
}

/// The document-fetch capability.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Retrieve `url` and return its decoded text.
    async fn fetch(&self, url: &str) -> std::result::Result<Document, FetchError>;
}
