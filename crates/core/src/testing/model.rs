use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use skoo_domain::{Completion, CompletionRequest, ModelError, ToolCall};

use crate::llm_ports::ChatModel;

/// Replays queued completions in order and records every request.
///
/// Clones share the script, so a test can keep one handle while the service
/// under test owns another. Builder methods queue and hand back such a clone.
#[derive(Default, Clone)]
pub struct ScriptedChatModel {
    script: Arc<Mutex<VecDeque<Result<Completion, ModelError>>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl ScriptedChatModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then_text(&self, text: &str) -> Self {
        self.push(Ok(Completion {
            content: Some(text.to_string()),
            tool_calls: Vec::new(),
            finish_reason: Some("stop".into()),
        }))
    }

    /// Queue a round requesting one tool call.
    pub fn then_tool(&self, id: &str, name: &str, arguments: &str) -> Self {
        self.then_tools(&[(id, name, arguments)])
    }

    /// Queue a round requesting several tool calls, given as `(id, name, arguments)`.
    pub fn then_tools(&self, calls: &[(&str, &str, &str)]) -> Self {
        self.push(Ok(Completion {
            content: None,
            tool_calls: calls
                .iter()
                .map(|(id, name, arguments)| ToolCall {
                    id: (*id).to_string(),
                    name: (*name).to_string(),
                    arguments: (*arguments).to_string(),
                })
                .collect(),
            finish_reason: Some("tool_calls".into()),
        }))
    }

    pub fn then_error(&self, error: ModelError) -> Self {
        self.push(Err(error))
    }

    /// Answer the next `times` calls with the same tool request.
    pub fn always_tool(&self, name: &str, arguments: &str, times: usize) -> Self {
        for i in 0..times {
            self.then_tool(&format!("call_{i}"), name, arguments);
        }
        self.clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn push(&self, item: Result<Completion, ModelError>) -> Self {
        self.script.lock().unwrap().push_back(item);
        self.clone()
    }
}

#[async_trait]
impl ChatModel for ScriptedChatModel {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, ModelError> {
        self.requests.lock().unwrap().push(request);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ModelError::InvalidResponse("script exhausted".into())))
    }
}
