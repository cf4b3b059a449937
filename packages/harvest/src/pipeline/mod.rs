//! Harvest pipeline: link extraction, dedup, structuring, orchestration.

pub mod dedup;
pub mod harvest;
pub mod links;
pub mod prompts;
pub mod structure;

pub use dedup::DedupStore;
pub use harvest::{harvest, HarvestReport};
pub use links::{clean_text, extract_listings, page_text, parse_listing_page};
pub use prompts::{format_structure_prompt, STRUCTURE_PROMPT, SYSTEM_PROMPT};
pub use structure::{
    parse_structure_response, structure_listing, CountField, StructuredDetails, NOT_SPECIFIED,
};
