//! Testing utilities including mock implementations.
//!
//! These are useful for exercising the pipeline without a browser, a
//! network, or a real LLM behind it.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, RwLock};

use crate::error::{FetchError, FetchResult, HarvestError, Result};
use crate::traits::{Ai, ListingStore, PageFetcher};
use crate::types::JobListing;

/// A mock fetcher backed by canned pages.
///
/// URLs without a fixture fail the way a dead link would, so tests can
/// cover fetch-failure isolation.
#[derive(Default)]
pub struct MockFetcher {
    pages: HashMap<String, String>,
}

impl MockFetcher {
    /// Create an empty mock fetcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a canned page for a URL (served for both rendered and
    /// plain fetches).
    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), html.into());
        self
    }

    fn get(&self, url: &str) -> FetchResult<String> {
        self.pages.get(url).cloned().ok_or_else(|| FetchError::Browser {
            url: url.to_string(),
            message: "no fixture registered".to_string(),
        })
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch_rendered(&self, url: &str) -> FetchResult<String> {
        self.get(url)
    }

    async fn fetch_text(&self, url: &str) -> FetchResult<String> {
        self.get(url)
    }
}

/// One scripted reply from [`MockAi`].
enum MockReply {
    Reply(String),
    TransportError,
}

/// A mock model returning scripted replies in order.
///
/// Records the number of calls so tests can assert exact retry counts.
#[derive(Default)]
pub struct MockAi {
    scripted: Mutex<VecDeque<MockReply>>,
    default_reply: Option<String>,
    calls: AtomicUsize,
}

impl MockAi {
    /// Create a mock with no scripted replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply, consumed in FIFO order.
    pub fn with_response(self, reply: impl Into<String>) -> Self {
        self.scripted
            .lock()
            .unwrap()
            .push_back(MockReply::Reply(reply.into()));
        self
    }

    /// Queue a transport failure.
    pub fn with_transport_error(self) -> Self {
        self.scripted
            .lock()
            .unwrap()
            .push_back(MockReply::TransportError);
        self
    }

    /// Reply to use once the scripted queue is drained.
    pub fn with_default_response(mut self, reply: impl Into<String>) -> Self {
        self.default_reply = Some(reply.into());
        self
    }

    /// Total completions requested so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Ai for MockAi {
    async fn complete(&self, _system: &str, _user: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(reply) = self.scripted.lock().unwrap().pop_front() {
            return match reply {
                MockReply::Reply(text) => Ok(text),
                MockReply::TransportError => Err(HarvestError::Ai("scripted transport error".into())),
            };
        }
        match &self.default_reply {
            Some(text) => Ok(text.clone()),
            None => Err(HarvestError::Ai("mock replies exhausted".into())),
        }
    }
}

/// In-memory listing store.
///
/// Useful for tests; data is lost on drop.
#[derive(Default)]
pub struct MemoryStore {
    listings: RwLock<Vec<JobListing>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with prior listings.
    pub fn with_listings(listings: Vec<JobListing>) -> Self {
        Self {
            listings: RwLock::new(listings),
        }
    }

    /// Number of persisted listings.
    pub fn len(&self) -> usize {
        self.listings.read().unwrap().len()
    }

    /// Whether the store holds no listings.
    pub fn is_empty(&self) -> bool {
        self.listings.read().unwrap().is_empty()
    }
}

#[async_trait]
impl ListingStore for MemoryStore {
    async fn load(&self) -> Result<Vec<JobListing>> {
        Ok(self.listings.read().unwrap().clone())
    }

    async fn append(&self, listing: &JobListing) -> Result<()> {
        self.listings.write().unwrap().push(listing.clone());
        Ok(())
    }
}
