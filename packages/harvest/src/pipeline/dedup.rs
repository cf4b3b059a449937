//! Duplicate tracking across runs.

use std::collections::HashSet;

use crate::types::JobListing;

/// Set of listing links that have already been harvested.
///
/// Seeded from prior output at startup and grown as listings persist;
/// never shrinks during a run. Single-threaded by design, matching the
/// strictly sequential orchestration.
#[derive(Debug, Default)]
pub struct DedupStore {
    seen: HashSet<String>,
}

impl DedupStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from previously persisted listings.
    pub fn from_listings(listings: &[JobListing]) -> Self {
        Self {
            seen: listings.iter().map(|l| l.cra_link.clone()).collect(),
        }
    }

    /// Whether this link has already been harvested.
    pub fn contains(&self, link: &str) -> bool {
        self.seen.contains(link)
    }

    /// Mark a link as harvested.
    pub fn add(&mut self, link: impl Into<String>) {
        self.seen.insert(link.into());
    }

    /// Number of known links.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Whether no links are known yet.
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
