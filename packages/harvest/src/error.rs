//! Typed errors for the harvesting library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors that can occur during harvest operations.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// Page fetch failed
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Structuring gave up after the retry budget
    #[error("structuring failed: {0}")]
    Structure(#[from] StructureError),

    /// AI service unavailable or failed
    #[error("AI service error: {0}")]
    Ai(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Storage operation failed
    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

/// Errors that can occur while fetching pages.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Browser session could not be started
    #[error("browser launch failed: {0}")]
    BrowserLaunch(String),

    /// Browser navigation or rendering failed
    #[error("browser error fetching {url}: {message}")]
    Browser { url: String, message: String },

    /// HTTP client could not be constructed
    #[error("HTTP client setup failed: {0}")]
    ClientSetup(String),

    /// Plain HTTP request failed
    #[error("HTTP error fetching {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status
    #[error("unexpected status {status} fetching {url}")]
    Status { url: String, status: u16 },
}

/// Errors from the listing structurer.
///
/// The retry loop deliberately does not distinguish transport failures
/// from malformed model output: each failed try burns one attempt.
#[derive(Debug, Error)]
pub enum StructureError {
    /// The model never produced valid output within the attempt budget
    #[error("no valid structured output after {attempts} attempts")]
    MaxAttemptsExceeded { attempts: u32 },

    /// Model response was not parseable JSON
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Parsed response violated the listing schema
    #[error("invalid structured output: {reason}")]
    Invalid { reason: String },
}

/// Result type alias for harvest operations.
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;
