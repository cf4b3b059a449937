//! AI trait for LLM operations.
//!
//! Implementations wrap a specific LLM provider and handle transport;
//! prompting and response validation live in the pipeline.

use async_trait::async_trait;

use crate::error::Result;

/// Chat-completion capability used by the structurer.
#[async_trait]
pub trait Ai: Send + Sync {
    /// Send a system + user message pair, return the raw model reply.
    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}
