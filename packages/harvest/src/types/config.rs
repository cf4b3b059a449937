//! Configuration for the harvest pipeline.

/// Default job board index page.
pub const DEFAULT_INDEX_URL: &str = "https://cra.org/ads/";

/// Configuration for a harvest run.
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    /// Index page to discover listings from.
    pub index_url: String,

    /// How many links found inside a listing body to fetch and feed
    /// to the structurer alongside the description. 0 disables it.
    pub additional_links: usize,

    /// Total structuring tries per listing before it is dropped.
    pub max_attempts: u32,

    /// Politeness delay between listing detail fetches, in milliseconds.
    pub fetch_delay_ms: u64,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            index_url: DEFAULT_INDEX_URL.to_string(),
            additional_links: 0,
            max_attempts: 3,
            fetch_delay_ms: 1000,
        }
    }
}

impl HarvestConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the index URL.
    pub fn with_index_url(mut self, url: impl Into<String>) -> Self {
        self.index_url = url.into();
        self
    }

    /// Set how many additional links to follow per listing.
    pub fn with_additional_links(mut self, count: usize) -> Self {
        self.additional_links = count;
        self
    }

    /// Set the structuring attempt budget.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Set the politeness delay between detail fetches.
    pub fn with_fetch_delay_ms(mut self, millis: u64) -> Self {
        self.fetch_delay_ms = millis;
        self
    }
}
