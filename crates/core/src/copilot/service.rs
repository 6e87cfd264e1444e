//! Copilot loop service - core business logic

use std::sync::Arc;

use serde_json::Value;
use skoo_domain::constants::COPILOT_FALLBACK_REPLY;
use skoo_domain::{
    ChatMessage, CompletionRequest, CopilotConfig, CopilotReply, CopilotRequest, ModelError,
    ToolCall, ToolCallRecord, ToolChoice,
};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::executor::ToolExecutor;
use super::prompt::build_system_prompt;
use super::tools::COPILOT_TOOLS;
use crate::clock::Clock;
use crate::llm_ports::ChatModel;

/// Drives the bounded model/tool round-trip for one request
pub struct CopilotService {
    model: Arc<dyn ChatModel>,
    executor: ToolExecutor,
    clock: Arc<dyn Clock>,
    model_name: String,
    max_tokens: u32,
    max_rounds: usize,
}

impl CopilotService {
    pub fn new(
        model: Arc<dyn ChatModel>,
        executor: ToolExecutor,
        clock: Arc<dyn Clock>,
        config: &CopilotConfig,
    ) -> Self {
        Self {
            model,
            executor,
            clock,
            model_name: config.model.clone(),
            max_tokens: config.max_tokens,
            max_rounds: config.max_rounds.max(1),
        }
    }

    /// Maximum number of model calls per request (never below 1)
    pub const fn max_rounds(&self) -> usize {
        self.max_rounds
    }

    /// Run the conversation to completion.
    ///
    /// Tool failures are fed back to the model; only gateway failures abort
    /// the loop. When every round requested tools, the fixed apology is
    /// returned together with the full audit trail.
    #[instrument(skip(self, request), fields(messages = request.messages.len()))]
    pub async fn run(
        &self,
        user_id: Uuid,
        request: CopilotRequest,
    ) -> Result<CopilotReply, ModelError> {
        let system_prompt = build_system_prompt(&request.user_context, self.clock.today());

        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        messages.push(ChatMessage::system(system_prompt));
        messages.extend(request.messages.into_iter().map(|m| ChatMessage::text(m.role, m.content)));

        let mut audit: Vec<ToolCallRecord> = Vec::new();

        for round in 1..=self.max_rounds {
            let completion = self.model.complete(self.round_request(&messages)).await?;

            if !completion.requests_tools() {
                info!(round, tool_calls = audit.len(), "copilot answered");
                return Ok(CopilotReply {
                    response: completion.content.unwrap_or_default(),
                    tool_calls: audit,
                });
            }

            debug!(round, requested = completion.tool_calls.len(), "model requested tools");
            let results = self.execute_calls(user_id, &completion.tool_calls, &mut audit).await;

            messages.push(ChatMessage::assistant_tool_calls(completion.content, completion.tool_calls));
            messages.extend(results);
        }

        warn!(
            max_rounds = self.max_rounds,
            tool_calls = audit.len(),
            "copilot round cap reached without a final answer"
        );
        Ok(CopilotReply { response: COPILOT_FALLBACK_REPLY.to_string(), tool_calls: audit })
    }

    fn round_request(&self, messages: &[ChatMessage]) -> CompletionRequest {
        CompletionRequest {
            tools: COPILOT_TOOLS.clone(),
            tool_choice: Some(ToolChoice::Auto),
            max_tokens: Some(self.max_tokens),
            ..CompletionRequest::new(self.model_name.clone(), messages.to_vec())
        }
    }

    /// Execute calls in order, recording each one, and build the tool messages.
    async fn execute_calls(
        &self,
        user_id: Uuid,
        calls: &[ToolCall],
        audit: &mut Vec<ToolCallRecord>,
    ) -> Vec<ChatMessage> {
        let mut results = Vec::with_capacity(calls.len());
        for call in calls {
            let input = parse_arguments(&call.arguments);
            let result = self.executor.execute(user_id, &call.name, &input).await;

            results.push(ChatMessage::tool_result(call.id.clone(), result.to_string()));
            audit.push(ToolCallRecord { name: call.name.clone(), input, result });
        }
        results
    }
}

/// Decode the model's argument string; unparseable text is kept verbatim so
/// the audit trail shows what the model sent.
fn parse_arguments(raw: &str) -> Value {
    if raw.trim().is_empty() {
        return Value::Object(serde_json::Map::new());
    }
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
