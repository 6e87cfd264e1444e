//! Copilot conversation types

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::context::StudentContext;
use crate::impl_domain_status_conversions;

/// Author of a message in a chat-completion conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
    Tool,
}

impl_domain_status_conversions!(ChatRole {
    System => "system",
    User => "user",
    Assistant => "assistant",
    Tool => "tool",
});

/// One prior message supplied by the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    /// `null` is read as an empty message
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `POST /skoo-copilot`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CopilotRequest {
    #[serde(default)]
    pub messages: Vec<ChatTurn>,
    #[serde(default)]
    pub user_context: StudentContext,
}

/// Audit entry for one executed tool call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallRecord {
    pub name: String,
    pub input: Value,
    pub result: Value,
}

/// Final copilot answer plus every tool call attempted while producing it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopilotReply {
    pub response: String,
    pub tool_calls: Vec<ToolCallRecord>,
}
