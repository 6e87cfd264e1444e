//! Port interface for chat-completion models

use async_trait::async_trait;
use skoo_domain::{Completion, CompletionRequest, ModelError};

/// A hosted LLM reachable through an OpenAI-style chat-completions API
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Run one completion round and return the first choice.
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, ModelError>;
}
