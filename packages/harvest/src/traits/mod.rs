//! Core trait abstractions at the capability seams.

pub mod ai;
pub mod fetcher;
pub mod store;

pub use ai::Ai;
pub use fetcher::PageFetcher;
pub use store::ListingStore;
