//! Page fetching trait.
//!
//! The pipeline treats page fetching as an opaque capability: give it a
//! URL, get rendered text back. Implementations decide how (headless
//! browser, plain HTTP, canned fixtures in tests).

use async_trait::async_trait;

use crate::error::FetchResult;

/// Fetcher for listing pages.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch a page through the browser, scrolling to the bottom until
    /// the page height stabilizes so lazily loaded listings render.
    async fn fetch_rendered(&self, url: &str) -> FetchResult<String>;

    /// Fetch a page body over plain HTTP. Used for links referenced
    /// inside a listing body, where rendering is not worth a browser
    /// round trip.
    async fn fetch_text(&self, url: &str) -> FetchResult<String>;
}
