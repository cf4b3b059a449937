//! Fetcher implementations.

pub mod chrome;

pub use chrome::ChromeFetcher;
