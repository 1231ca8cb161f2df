//! The bibliographic source trait.
//!
//! Every ISBN provider (the regional catalog, the generalist REST service)
//! implements this seam. Lookups never raise: a provider failure is
//! captured and logged inside the implementation and the output slot is
//! simply left empty — the reconciler treats an empty slot as "this source
//! is unavailable".

use async_trait::async_trait;

use citeforge_core::record::Record;

/// A provider of bibliographic records for ISBNs.
#[async_trait]
pub trait BibSource: Send + Sync {
    /// A human-readable name for this source.
    fn name(&self) -> &str;

    /// Look up an ISBN. `None` means the source has no entry or could not
    /// be reached.
    async fn lookup(&self, isbn: &str) -> Option<Record>;
}
