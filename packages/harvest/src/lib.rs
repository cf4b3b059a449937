//! Academic Job Listing Harvester
//!
//! A batch harvesting library for the CRA job board: discover listings
//! from the index page, skip anything already persisted, fetch each
//! detail page, normalize the free-text description into a fixed
//! schema through an LLM, and append validated records to a CSV.
//!
//! # Design
//!
//! - Capability seams are traits: [`PageFetcher`], [`Ai`],
//!   [`ListingStore`]. The pipeline is generic over all three, so it
//!   runs identically against headless Chrome + OpenAI + CSV in
//!   production and mocks in tests.
//! - The output CSV is also the duplicate-detection source of truth:
//!   [`DedupStore`] is seeded from it at startup, making reruns
//!   idempotent.
//! - Structuring is bounded retry with permanent drop: a listing the
//!   model cannot structure within the attempt budget is logged and
//!   skipped, never partially persisted.
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions (PageFetcher, Ai, ListingStore)
//! - [`types`] - Listing records and run configuration
//! - [`pipeline`] - Link extraction, dedup, structuring, orchestration
//! - [`stores`] - Storage implementations (CsvStore)
//! - [`fetchers`] - Fetcher implementations (ChromeFetcher)
//! - [`ai`] - LLM implementations (OpenAi)
//! - [`testing`] - Mock implementations for testing

pub mod ai;
pub mod error;
pub mod fetchers;
pub mod pipeline;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{FetchError, HarvestError, Result, StructureError};
pub use traits::{Ai, ListingStore, PageFetcher};
pub use types::{
    config::{HarvestConfig, DEFAULT_INDEX_URL},
    listing::{JobListing, ListingPage, ListingSummary},
};

// Re-export pipeline entry points
pub use pipeline::{
    extract_listings, harvest, parse_listing_page, structure_listing, DedupStore, HarvestReport,
    StructuredDetails,
};

// Re-export implementations
pub use ai::OpenAi;
pub use fetchers::ChromeFetcher;
pub use stores::CsvStore;
