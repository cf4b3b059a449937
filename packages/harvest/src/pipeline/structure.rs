//! Listing structuring - turn free-text descriptions into the fixed
//! schema via the model, with bounded retry.
//!
//! Each try is one model call followed by parse + validation. Transport
//! failures and malformed output burn attempts the same way; there is
//! no back-off. Exhausting the budget drops the listing for this run.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use crate::error::StructureError;
use crate::pipeline::prompts::{format_structure_prompt, SYSTEM_PROMPT};
use crate::traits::Ai;

/// Sentinel the model uses for absent values.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Structured fields extracted from one listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredDetails {
    pub university_name: String,
    pub department: String,
    pub position: String,
    pub submission_deadline: String,
    pub hiring_areas: Vec<String>,
    pub recommendation_letters: CountField,
    pub positions_available: CountField,
    pub additional_comments: String,
}

/// A count the model may return as a JSON number, a numeric string,
/// or the "Not specified" sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CountField {
    Number(u64),
    Text(String),
}

impl CountField {
    /// Numeric, or the sentinel. Anything else fails validation.
    fn is_well_formed(&self) -> bool {
        match self {
            CountField::Number(_) => true,
            CountField::Text(text) => {
                text.trim() == NOT_SPECIFIED || text.trim().parse::<u64>().is_ok()
            }
        }
    }
}

impl fmt::Display for CountField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountField::Number(n) => write!(f, "{}", n),
            CountField::Text(text) => f.write_str(text.trim()),
        }
    }
}

/// Parse and validate a raw model reply.
pub fn parse_structure_response(raw: &str) -> Result<StructuredDetails, StructureError> {
    let details: StructuredDetails = serde_json::from_str(strip_code_fence(raw))?;
    validate(&details)?;
    Ok(details)
}

/// Models occasionally wrap the JSON object in a markdown code fence.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn validate(details: &StructuredDetails) -> Result<(), StructureError> {
    let invalid = |reason: &str| StructureError::Invalid {
        reason: reason.to_string(),
    };

    if details.university_name.trim().is_empty() {
        return Err(invalid("empty university name"));
    }
    if details.department.trim().is_empty() {
        return Err(invalid("empty department"));
    }
    if details.position.trim().is_empty() {
        return Err(invalid("empty position"));
    }
    if details.hiring_areas.is_empty() {
        return Err(invalid("empty hiring areas"));
    }

    let deadline = details.submission_deadline.trim();
    if deadline != NOT_SPECIFIED
        && chrono::NaiveDate::parse_from_str(deadline, "%Y-%m-%d").is_err()
    {
        return Err(StructureError::Invalid {
            reason: format!("unparseable submission deadline: {:?}", deadline),
        });
    }

    if !details.recommendation_letters.is_well_formed() {
        return Err(invalid("recommendation letters is neither numeric nor unspecified"));
    }
    if !details.positions_available.is_well_formed() {
        return Err(invalid("positions available is neither numeric nor unspecified"));
    }

    Ok(())
}

/// Structure a listing with up to `max_attempts` total model calls.
///
/// Returns [`StructureError::MaxAttemptsExceeded`] after exactly
/// `max_attempts` unsuccessful tries - never a partial record.
pub async fn structure_listing<A: Ai>(
    ai: &A,
    title: &str,
    details: &str,
    max_attempts: u32,
) -> Result<StructuredDetails, StructureError> {
    let prompt = format_structure_prompt(title, details);

    for attempt in 1..=max_attempts {
        match ai.complete(SYSTEM_PROMPT, &prompt).await {
            Ok(raw) => match parse_structure_response(&raw) {
                Ok(structured) => return Ok(structured),
                Err(e) => {
                    warn!(
                        "Structuring attempt {}/{} returned invalid output: {}",
                        attempt, max_attempts, e
                    );
                }
            },
            Err(e) => {
                warn!(
                    "Structuring attempt {}/{} failed to reach the model: {}",
                    attempt, max_attempts, e
                );
            }
        }
    }

    Err(StructureError::MaxAttemptsExceeded {
        attempts: max_attempts,
    })
}
