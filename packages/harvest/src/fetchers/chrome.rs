//! Headless-Chrome fetcher.
//!
//! Listing pages on the job board load lazily as the viewport scrolls,
//! so rendered fetches scroll to the bottom until the page height stops
//! growing before taking the DOM. Additional-link pages are fetched
//! over plain HTTP; they do not need a browser.

use async_trait::async_trait;
use headless_chrome::{Browser, LaunchOptionsBuilder, Tab};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::error::{FetchError, FetchResult};
use crate::traits::PageFetcher;

/// How long to let the page settle between scroll steps.
const SCROLL_SETTLE: Duration = Duration::from_secs(2);

/// Timeout for plain HTTP fetches of additional links.
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetcher driving a single headless Chrome tab, plus a reqwest client
/// for plain pages. One instance lives for the whole run; the browser
/// process is torn down on drop.
pub struct ChromeFetcher {
    // Keeps the browser process alive for the lifetime of the tab.
    _browser: Browser,
    tab: Arc<Tab>,
    client: reqwest::Client,
}

impl ChromeFetcher {
    /// Launch headless Chrome from the given binary path and open the
    /// tab used for every rendered fetch.
    pub fn launch(browser_path: impl Into<PathBuf>) -> FetchResult<Self> {
        let options = LaunchOptionsBuilder::default()
            .headless(true)
            .path(Some(browser_path.into()))
            .build()
            .map_err(|e| FetchError::BrowserLaunch(e.to_string()))?;
        let browser =
            Browser::new(options).map_err(|e| FetchError::BrowserLaunch(e.to_string()))?;
        let tab = browser
            .new_tab()
            .map_err(|e| FetchError::BrowserLaunch(e.to_string()))?;
        let client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| FetchError::ClientSetup(e.to_string()))?;

        Ok(Self {
            _browser: browser,
            tab,
            client,
        })
    }

    fn scroll_height(&self, url: &str) -> FetchResult<i64> {
        let result = self
            .tab
            .evaluate("document.body.scrollHeight", false)
            .map_err(|e| browser_err(url, e))?;
        Ok(result.value.and_then(|v| v.as_i64()).unwrap_or(0))
    }
}

fn browser_err(url: &str, e: impl std::fmt::Display) -> FetchError {
    FetchError::Browser {
        url: url.to_string(),
        message: e.to_string(),
    }
}

#[async_trait]
impl PageFetcher for ChromeFetcher {
    async fn fetch_rendered(&self, url: &str) -> FetchResult<String> {
        self.tab.navigate_to(url).map_err(|e| browser_err(url, e))?;
        self.tab
            .wait_until_navigated()
            .map_err(|e| browser_err(url, e))?;

        // Scroll until the page height stabilizes so lazily loaded
        // listings are all in the DOM.
        let mut last_height = self.scroll_height(url)?;
        loop {
            self.tab
                .evaluate("window.scrollTo(0, document.body.scrollHeight);", false)
                .map_err(|e| browser_err(url, e))?;
            tokio::time::sleep(SCROLL_SETTLE).await;

            let new_height = self.scroll_height(url)?;
            if new_height == last_height {
                break;
            }
            debug!("Page {} grew to {} while scrolling", url, new_height);
            last_height = new_height;
        }

        self.tab.get_content().map_err(|e| browser_err(url, e))
    }

    async fn fetch_text(&self, url: &str) -> FetchResult<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Http {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| FetchError::Http {
            url: url.to_string(),
            source: e,
        })
    }
}
