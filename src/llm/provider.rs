use async_trait::async_trait;
use crate::error::Result;
use crate::llm::prompts::NarrativeRequest;
use crate::models::AiInsight;

/// Optional text-generation collaborator. Callers treat any error as
/// "no narrative" and keep the deterministic result.
#[async_trait]
pub trait NarrativeProvider: Send + Sync {
    async fn summarize(&self, request: &NarrativeRequest) -> Result<AiInsight>;
    fn name(&self) -> &str;
}
