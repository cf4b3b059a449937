//! Listing types: index entries, detail pages, and the persisted record.

use serde::{Deserialize, Serialize};

/// One entry from the job board index page.
///
/// Carries only what the index markup itself exposes; everything else
/// comes from the detail page and the structurer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingSummary {
    /// Listing title as shown on the index
    pub title: String,

    /// Absolute URL of the detail page (the dedup key)
    pub link: String,

    /// Hiring institution as shown on the index
    pub company: String,

    /// Location string with the institution name stripped
    pub location: String,

    /// Job type label (e.g. "Full Time")
    pub job_type: String,
}

/// Parsed content of a listing detail page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingPage {
    /// Full job description text
    pub description: String,

    /// Posted date as shown on the page
    pub posted_date: String,

    /// Expiration date as shown on the page
    pub expiration_date: String,

    /// All http(s) links found inside the description body,
    /// relative hrefs already resolved against the listing URL
    pub additional_links: Vec<String>,
}

/// One persisted row of output.
///
/// Field order here is the CSV column order; serde renames are the
/// exact header names, so reading a file back reproduces the records
/// that were written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobListing {
    #[serde(rename = "Company/University")]
    pub company: String,

    #[serde(rename = "Department")]
    pub department: String,

    #[serde(rename = "Position")]
    pub position: String,

    #[serde(rename = "Hiring Areas")]
    pub hiring_areas: String,

    #[serde(rename = "Location")]
    pub location: String,

    #[serde(rename = "Number of Positions")]
    pub positions_available: String,

    #[serde(rename = "Submission Deadline")]
    pub submission_deadline: String,

    #[serde(rename = "Number of Recommendation Letters")]
    pub recommendation_letters: String,

    #[serde(rename = "Expiration Date")]
    pub expiration_date: String,

    /// Unique key; the dedup store is seeded from this column.
    #[serde(rename = "CRA Link")]
    pub cra_link: String,

    /// Set once, when structuring succeeds. Never mutated afterward.
    #[serde(rename = "Crawl Time")]
    pub crawl_time: String,

    #[serde(rename = "Posted Date")]
    pub posted_date: String,

    #[serde(rename = "Job Type")]
    pub job_type: String,

    #[serde(rename = "Additional Links", with = "newline_list")]
    pub additional_links: Vec<String>,

    #[serde(rename = "Additional Comments")]
    pub additional_comments: String,
}

/// Serialize a list of links into a single newline-joined CSV field.
mod newline_list {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(links: &[String], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&links.join("\n"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        let joined = String::deserialize(deserializer)?;
        if joined.is_empty() {
            return Ok(Vec::new());
        }
        Ok(joined.lines().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> JobListing {
        JobListing {
            company: "Example University".to_string(),
            department: "Computer Science".to_string(),
            position: "Assistant Professor".to_string(),
            hiring_areas: "Systems, Security".to_string(),
            location: "Springfield, IL".to_string(),
            positions_available: "2".to_string(),
            submission_deadline: "2026-12-01".to_string(),
            recommendation_letters: "3".to_string(),
            expiration_date: "December 31, 2026".to_string(),
            cra_link: "https://cra.org/ads/example-1".to_string(),
            crawl_time: "2026-08-29 10:00:00".to_string(),
            posted_date: "August 1, 2026".to_string(),
            job_type: "Full Time".to_string(),
            additional_links: vec![
                "https://example.edu/apply".to_string(),
                "https://example.edu/faq".to_string(),
            ],
            additional_comments: "Start date negotiable.".to_string(),
        }
    }

    #[test]
    fn csv_round_trip_preserves_record() {
        let mut writer = csv::Writer::from_writer(vec![]);
        writer.serialize(sample()).unwrap();
        let bytes = writer.into_inner().unwrap();

        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let back: JobListing = reader.deserialize().next().unwrap().unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn additional_links_join_on_newline() {
        let mut writer = csv::Writer::from_writer(vec![]);
        writer.serialize(sample()).unwrap();
        let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert!(text.contains("https://example.edu/apply\nhttps://example.edu/faq"));
    }

    #[test]
    fn empty_links_deserialize_to_empty_vec() {
        let mut listing = sample();
        listing.additional_links.clear();

        let mut writer = csv::Writer::from_writer(vec![]);
        writer.serialize(&listing).unwrap();
        let bytes = writer.into_inner().unwrap();

        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let back: JobListing = reader.deserialize().next().unwrap().unwrap();
        assert!(back.additional_links.is_empty());
    }
}
