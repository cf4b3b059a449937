//! CSV-backed listing store.
//!
//! The CSV file doubles as the database: all rows are read back at
//! startup to seed duplicate detection, and new rows are appended with
//! the header written once on creation. The column contract lives on
//! [`JobListing`](crate::types::JobListing)'s serde renames.

use async_trait::async_trait;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use crate::error::{HarvestError, Result};
use crate::traits::ListingStore;
use crate::types::JobListing;

/// Append-only CSV store.
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    /// Create a store backed by the given path. The file is created
    /// lazily on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_started(&self) -> bool {
        std::fs::metadata(&self.path).map(|m| m.len() > 0).unwrap_or(false)
    }
}

fn storage_err<E: std::error::Error + Send + Sync + 'static>(e: E) -> HarvestError {
    HarvestError::Storage(Box::new(e))
}

#[async_trait]
impl ListingStore for CsvStore {
    async fn load(&self) -> Result<Vec<JobListing>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::Reader::from_path(&self.path).map_err(storage_err)?;
        let mut listings = Vec::new();
        for row in reader.deserialize() {
            listings.push(row.map_err(storage_err)?);
        }
        Ok(listings)
    }

    async fn append(&self, listing: &JobListing) -> Result<()> {
        let write_header = !self.is_started();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(storage_err)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);
        writer.serialize(listing).map_err(storage_err)?;
        writer.flush().map_err(storage_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::DedupStore;

    fn listing(link: &str) -> JobListing {
        JobListing {
            company: "Example University".to_string(),
            department: "Computer Science".to_string(),
            position: "Assistant Professor".to_string(),
            hiring_areas: "Systems, Security".to_string(),
            location: "Springfield, IL".to_string(),
            positions_available: "1".to_string(),
            submission_deadline: "2026-12-01".to_string(),
            recommendation_letters: "3".to_string(),
            expiration_date: "December 31, 2026".to_string(),
            cra_link: link.to_string(),
            crawl_time: "2026-08-29 10:00:00".to_string(),
            posted_date: "August 1, 2026".to_string(),
            job_type: "Full Time".to_string(),
            additional_links: vec!["https://example.edu/apply".to_string()],
            additional_comments: "Comma, and \"quotes\" survive.".to_string(),
        }
    }

    #[tokio::test]
    async fn missing_file_loads_as_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvStore::new(dir.path().join("never_written.csv"));
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn append_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvStore::new(dir.path().join("listings.csv"));

        for i in 0..3 {
            store
                .append(&listing(&format!("https://cra.org/ads/{i}")))
                .await
                .unwrap();
        }

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded[0], listing("https://cra.org/ads/0"));

        let dedup = DedupStore::from_listings(&loaded);
        assert_eq!(dedup.len(), 3);
        assert!(dedup.contains("https://cra.org/ads/2"));
    }

    #[tokio::test]
    async fn header_is_written_exactly_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listings.csv");
        let store = CsvStore::new(&path);

        store.append(&listing("https://cra.org/ads/a")).await.unwrap();
        store.append(&listing("https://cra.org/ads/b")).await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.matches("CRA Link").count(), 1);
        assert!(text.starts_with("Company/University,Department,Position,Hiring Areas,Location"));
    }

    #[tokio::test]
    async fn reopened_store_appends_without_repeating_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listings.csv");

        CsvStore::new(&path)
            .append(&listing("https://cra.org/ads/a"))
            .await
            .unwrap();
        // New store instance over the same file, as a rerun would create.
        let store = CsvStore::new(&path);
        store.append(&listing("https://cra.org/ads/b")).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.len(), 2);
    }
}
