//! Study aid generation service

use std::sync::Arc;

use serde_json::Value;
use skoo_domain::{
    ChatMessage, CompletionRequest, ModelError, StudyToolKind, StudyToolRequest, ToolChoice,
};
use thiserror::Error;
use tracing::{info, instrument};

use super::prompts::{forced_tool, system_prompt, user_message};
use crate::llm_ports::ChatModel;

#[derive(Debug, Error)]
pub enum StudyToolError {
    #[error("Unknown type: {0}")]
    UnknownType(String),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Invalid study tool output: {0}")]
    InvalidOutput(String),
}

pub struct StudyToolsService {
    model: Arc<dyn ChatModel>,
    model_name: String,
}

impl StudyToolsService {
    pub fn new(model: Arc<dyn ChatModel>, model_name: impl Into<String>) -> Self {
        Self { model, model_name: model_name.into() }
    }

    /// Generate the requested study aid.
    ///
    /// The result comes from the first tool call's arguments, falling back
    /// to the message content parsed as JSON, else `null`.
    #[instrument(skip(self, request), fields(kind = %request.kind))]
    pub async fn generate(&self, request: &StudyToolRequest) -> Result<Value, StudyToolError> {
        let kind: StudyToolKind = request
            .kind
            .parse()
            .map_err(|_| StudyToolError::UnknownType(request.kind.clone()))?;

        let tool = forced_tool(kind);
        let completion_request = CompletionRequest {
            tool_choice: Some(ToolChoice::Function(tool.name.clone())),
            tools: vec![tool],
            ..CompletionRequest::new(
                self.model_name.clone(),
                vec![
                    ChatMessage::system(system_prompt(kind)),
                    ChatMessage::user(user_message(&request.subject, request.content.as_deref())),
                ],
            )
        };

        let completion = self.model.complete(completion_request).await?;

        let result = if let Some(call) = completion.tool_calls.first() {
            serde_json::from_str(&call.arguments)
                .map_err(|e| StudyToolError::InvalidOutput(e.to_string()))?
        } else {
            match completion.content.as_deref().filter(|c| !c.is_empty()) {
                Some(content) => serde_json::from_str(content)
                    .map_err(|e| StudyToolError::InvalidOutput(e.to_string()))?,
                None => Value::Null,
            }
        };

        info!(kind = %kind, has_result = !result.is_null(), "study aid generated");
        Ok(result)
    }
}
