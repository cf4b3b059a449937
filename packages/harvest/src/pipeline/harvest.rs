//! Harvest orchestration - discover, dedup, fetch, structure, persist.

use tracing::{info, warn};

use crate::error::Result;
use crate::pipeline::dedup::DedupStore;
use crate::pipeline::links::{clean_text, extract_listings, page_text, parse_listing_page};
use crate::pipeline::structure::structure_listing;
use crate::traits::{Ai, ListingStore, PageFetcher};
use crate::types::{HarvestConfig, JobListing, ListingSummary};

/// Additional-link page text is truncated to this many characters
/// before being handed to the model.
const ADDITIONAL_CONTENT_CHARS: usize = 1000;

/// Counters for one harvest run.
#[derive(Debug, Clone, Default)]
pub struct HarvestReport {
    /// Listings found on the index page
    pub discovered: usize,

    /// Listings skipped because their link was already persisted
    pub skipped_duplicates: usize,

    /// Listings structured and persisted this run
    pub harvested: usize,

    /// Listings dropped because the detail page would not fetch
    pub fetch_failures: usize,

    /// Listings dropped after the structuring attempt budget
    pub structure_failures: usize,

    /// Links known to the dedup store when the run finished
    pub known_links: usize,
}

impl HarvestReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether every discovered listing was either harvested or a
    /// known duplicate.
    pub fn is_clean(&self) -> bool {
        self.fetch_failures == 0 && self.structure_failures == 0
    }
}

/// Run one harvest pass: load prior output, walk the index, and append
/// every newly structured listing to the store.
///
/// Strictly sequential; listings are processed one at a time in index
/// order. Per-listing failures are logged and skipped - one bad listing
/// never aborts the batch.
pub async fn harvest<F, A, S>(
    config: &HarvestConfig,
    fetcher: &F,
    ai: &A,
    store: &S,
) -> Result<HarvestReport>
where
    F: PageFetcher,
    A: Ai,
    S: ListingStore,
{
    let mut report = HarvestReport::new();

    let existing = store.load().await?;
    let mut dedup = DedupStore::from_listings(&existing);
    info!("Loaded {} previously harvested listings", dedup.len());

    let index_html = fetcher.fetch_rendered(&config.index_url).await?;
    let listings = extract_listings(&index_html);
    report.discovered = listings.len();

    if listings.is_empty() {
        warn!("No job listings found on {}", config.index_url);
        report.known_links = dedup.len();
        return Ok(report);
    }
    info!("Discovered {} listings on {}", listings.len(), config.index_url);

    for summary in &listings {
        if dedup.contains(&summary.link) {
            info!("Skipping duplicate listing: {}", summary.link);
            report.skipped_duplicates += 1;
            continue;
        }

        match harvest_one(config, fetcher, ai, summary).await {
            Ok(Some(listing)) => {
                store.append(&listing).await?;
                dedup.add(&summary.link);
                report.harvested += 1;
                info!("Harvested listing: {}", listing_title(summary));
            }
            Ok(None) => report.structure_failures += 1,
            Err(e) => {
                warn!("Failed to fetch listing {}: {}", summary.link, e);
                report.fetch_failures += 1;
            }
        }
    }

    report.known_links = dedup.len();
    info!(
        "Harvest complete: {} discovered, {} harvested, {} duplicates, {} fetch failures, {} structure failures",
        report.discovered,
        report.harvested,
        report.skipped_duplicates,
        report.fetch_failures,
        report.structure_failures
    );

    Ok(report)
}

/// "Company (Location): Title", the identity shown in logs and fed to
/// the structuring prompt.
fn listing_title(summary: &ListingSummary) -> String {
    format!("{} ({}): {}", summary.company, summary.location, summary.title)
}

/// Process one listing end to end.
///
/// `Ok(None)` means structuring exhausted its budget; the listing is
/// dropped for this run and may be retried on the next one. An `Err`
/// is a detail-page fetch failure.
async fn harvest_one<F, A>(
    config: &HarvestConfig,
    fetcher: &F,
    ai: &A,
    summary: &ListingSummary,
) -> Result<Option<JobListing>>
where
    F: PageFetcher,
    A: Ai,
{
    let detail_html = fetcher.fetch_rendered(&summary.link).await?;
    let page = parse_listing_page(&detail_html, &summary.link);

    let mut details = page.description.clone();
    for link in page.additional_links.iter().take(config.additional_links) {
        match fetcher.fetch_text(link).await {
            Ok(body) => {
                let text: String = page_text(&body)
                    .chars()
                    .take(ADDITIONAL_CONTENT_CHARS)
                    .collect();
                details.push_str(&format!("\n\nAdditional content from {}:\n{}...", link, text));
            }
            Err(e) => warn!("Error fetching content from {}: {}", link, e),
        }
    }

    // Be nice to the server between detail fetches.
    if config.fetch_delay_ms > 0 {
        tokio::time::sleep(std::time::Duration::from_millis(config.fetch_delay_ms)).await;
    }

    let title = listing_title(summary);
    let structured = match structure_listing(ai, &title, &details, config.max_attempts).await {
        Ok(structured) => structured,
        Err(e) => {
            warn!("Dropping listing {}: {}", summary.link, e);
            return Ok(None);
        }
    };

    // Crawl time marks the moment structuring succeeded.
    let crawl_time = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    Ok(Some(JobListing {
        company: clean_text(&structured.university_name),
        department: clean_text(&structured.department),
        position: clean_text(&structured.position),
        hiring_areas: structured.hiring_areas.join(", "),
        location: summary.location.clone(),
        positions_available: structured.positions_available.to_string(),
        submission_deadline: structured.submission_deadline.trim().to_string(),
        recommendation_letters: structured.recommendation_letters.to_string(),
        expiration_date: page.expiration_date,
        cra_link: summary.link.clone(),
        crawl_time,
        posted_date: page.posted_date,
        job_type: summary.job_type.clone(),
        additional_links: page.additional_links,
        additional_comments: structured.additional_comments,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryStore, MockAi, MockFetcher};

    const INDEX_URL: &str = "https://cra.org/ads/";

    const VALID_RESPONSE: &str = r#"{
        "university_name": "Example University",
        "department": "Computer Science",
        "position": "Assistant Professor",
        "submission_deadline": "2026-12-01",
        "hiring_areas": ["Systems"],
        "recommendation_letters": 3,
        "positions_available": 1,
        "additional_comments": "None."
    }"#;

    fn index_html(links: &[&str]) -> String {
        let items: String = links
            .iter()
            .enumerate()
            .map(|(i, link)| {
                format!(
                    r#"<li class="job_listing">
                        <a href="{link}"></a>
                        <h3>Listing {i}</h3>
                        <div class="location"><strong>Example University</strong> Springfield, IL</div>
                        <ul><li class="job-type">Full Time</li></ul>
                    </li>"#
                )
            })
            .collect();
        format!("<ul class=\"job_listings\">{items}</ul>")
    }

    fn detail_html() -> &'static str {
        r#"<div class="job_description">
            Tenure-track opening. <a href="https://example.edu/apply">Apply</a>
        </div>
        <ul class="meta">
            <li class="date-posted">August 1, 2026</li>
            <li class="date-posted">Expires on: December 31, 2026</li>
        </ul>"#
    }

    fn config() -> HarvestConfig {
        HarvestConfig::new().with_fetch_delay_ms(0)
    }

    fn persisted(link: &str) -> JobListing {
        JobListing {
            company: "Example University".to_string(),
            department: "Computer Science".to_string(),
            position: "Postdoc".to_string(),
            hiring_areas: "All areas".to_string(),
            location: "Springfield, IL".to_string(),
            positions_available: "1".to_string(),
            submission_deadline: "Not specified".to_string(),
            recommendation_letters: "Not specified".to_string(),
            expiration_date: String::new(),
            cra_link: link.to_string(),
            crawl_time: "2026-08-01 00:00:00".to_string(),
            posted_date: String::new(),
            job_type: "Full Time".to_string(),
            additional_links: vec![],
            additional_comments: String::new(),
        }
    }

    #[tokio::test]
    async fn harvests_new_listings_and_skips_persisted_ones() {
        let links = [
            "https://cra.org/ads/one",
            "https://cra.org/ads/two",
            "https://cra.org/ads/three",
        ];
        let fetcher = MockFetcher::new()
            .with_page(INDEX_URL, index_html(&links))
            .with_page(links[0], detail_html())
            .with_page(links[2], detail_html());
        let ai = MockAi::new().with_default_response(VALID_RESPONSE);
        let store = MemoryStore::with_listings(vec![persisted(links[1])]);

        let report = harvest(&config(), &fetcher, &ai, &store).await.unwrap();

        assert_eq!(report.discovered, 3);
        assert_eq!(report.harvested, 2);
        assert_eq!(report.skipped_duplicates, 1);
        assert_eq!(report.known_links, 3);
        assert_eq!(store.len(), 3);
        // The duplicate never reached the model.
        assert_eq!(ai.call_count(), 2);
    }

    #[tokio::test]
    async fn rerun_over_same_output_adds_nothing() {
        let links = ["https://cra.org/ads/one"];
        let fetcher = MockFetcher::new()
            .with_page(INDEX_URL, index_html(&links))
            .with_page(links[0], detail_html());
        let ai = MockAi::new().with_default_response(VALID_RESPONSE);
        let store = MemoryStore::new();

        let first = harvest(&config(), &fetcher, &ai, &store).await.unwrap();
        assert_eq!(first.harvested, 1);

        let second = harvest(&config(), &fetcher, &ai, &store).await.unwrap();
        assert_eq!(second.harvested, 0);
        assert_eq!(second.skipped_duplicates, 1);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn malformed_output_retried_within_budget_is_persisted() {
        let links = ["https://cra.org/ads/one"];
        let fetcher = MockFetcher::new()
            .with_page(INDEX_URL, index_html(&links))
            .with_page(links[0], detail_html());
        let ai = MockAi::new()
            .with_response("not json")
            .with_response("also not json")
            .with_response(VALID_RESPONSE);
        let store = MemoryStore::new();

        let report = harvest(&config().with_max_attempts(3), &fetcher, &ai, &store)
            .await
            .unwrap();

        assert_eq!(report.harvested, 1);
        assert_eq!(report.structure_failures, 0);
        assert_eq!(ai.call_count(), 3);
    }

    #[tokio::test]
    async fn exhausted_attempts_drop_the_listing() {
        let links = ["https://cra.org/ads/one"];
        let fetcher = MockFetcher::new()
            .with_page(INDEX_URL, index_html(&links))
            .with_page(links[0], detail_html());
        let ai = MockAi::new().with_default_response("never valid");
        let store = MemoryStore::new();

        let report = harvest(&config().with_max_attempts(2), &fetcher, &ai, &store)
            .await
            .unwrap();

        assert_eq!(report.harvested, 0);
        assert_eq!(report.structure_failures, 1);
        assert_eq!(ai.call_count(), 2);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn detail_fetch_failure_does_not_abort_the_batch() {
        let links = ["https://cra.org/ads/dead", "https://cra.org/ads/live"];
        let fetcher = MockFetcher::new()
            .with_page(INDEX_URL, index_html(&links))
            .with_page(links[1], detail_html());
        let ai = MockAi::new().with_default_response(VALID_RESPONSE);
        let store = MemoryStore::new();

        let report = harvest(&config(), &fetcher, &ai, &store).await.unwrap();

        assert_eq!(report.fetch_failures, 1);
        assert_eq!(report.harvested, 1);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn empty_index_is_not_fatal() {
        let fetcher = MockFetcher::new().with_page(INDEX_URL, "<ul class=\"job_listings\"></ul>");
        let ai = MockAi::new();
        let store = MemoryStore::new();

        let report = harvest(&config(), &fetcher, &ai, &store).await.unwrap();
        assert_eq!(report.discovered, 0);
        assert_eq!(report.harvested, 0);
        assert_eq!(ai.call_count(), 0);
    }

    #[tokio::test]
    async fn additional_link_content_reaches_the_model() {
        let links = ["https://cra.org/ads/one"];
        let detail = r#"<div class="job_description">
            See the posting. <a href="https://example.edu/full">Full ad</a>
        </div>"#;
        let fetcher = MockFetcher::new()
            .with_page(INDEX_URL, index_html(&links))
            .with_page(links[0], detail)
            .with_page("https://example.edu/full", "<body><p>Deadline is Dec 1.</p></body>");
        let ai = MockAi::new().with_default_response(VALID_RESPONSE);
        let store = MemoryStore::new();

        let report = harvest(
            &config().with_additional_links(1),
            &fetcher,
            &ai,
            &store,
        )
        .await
        .unwrap();

        assert_eq!(report.harvested, 1);
        let rows = store.load().await.unwrap();
        assert_eq!(rows[0].additional_links, vec!["https://example.edu/full".to_string()]);
    }
}
