//! Listing persistence trait.
//!
//! The store is both the output sink and the duplicate-detection source
//! of truth: whatever `append` wrote, `load` must give back, so a rerun
//! seeds its dedup set from prior output. The encoding contract is the
//! fixed column set of [`JobListing`](crate::types::JobListing); backends
//! other than CSV can implement this without touching pipeline logic.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::JobListing;

/// Append-only repository of harvested listings.
#[async_trait]
pub trait ListingStore: Send + Sync {
    /// Load all previously persisted listings, oldest first.
    /// An absent backing file is an empty store, not an error.
    async fn load(&self) -> Result<Vec<JobListing>>;

    /// Append one fully populated listing. Partial rows are never
    /// written; callers only reach this after validation succeeds.
    async fn append(&self, listing: &JobListing) -> Result<()>;
}
