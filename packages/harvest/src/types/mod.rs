//! Domain data types.

pub mod config;
pub mod listing;

pub use config::HarvestConfig;
pub use listing::{JobListing, ListingPage, ListingSummary};
