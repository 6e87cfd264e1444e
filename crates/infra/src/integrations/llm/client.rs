/// Chat-completions gateway client used by the copilot, study tools and coach
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use skoo_core::ChatModel;
use skoo_domain::constants::DEFAULT_GATEWAY_URL;
use skoo_domain::{Completion, CompletionRequest, LlmConfig, ModelError, SkooError};
use tracing::{debug, warn};

use super::types::{
    tool_choice_value, ChatCompletionRequest, ChatCompletionResponse, WireMessage, WireTool,
};
use crate::http::HttpClient;

/// OpenAI-style gateway client
pub struct GatewayClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl GatewayClient {
    /// Create a new gateway client
    ///
    /// # Arguments
    /// * `api_key` - Gateway API key (sent as a bearer token)
    /// * `http_client` - HTTP client with retry logic
    pub fn new(api_key: String, http_client: HttpClient) -> Self {
        Self { http_client, api_key, api_url: DEFAULT_GATEWAY_URL.to_string() }
    }

    /// Build a client from configuration, with its own timeout.
    pub fn from_config(config: &LlmConfig) -> Result<Self, SkooError> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .max_attempts(2)
            .build()?;
        Ok(Self::new(config.api_key.clone(), http_client).with_api_url(config.api_url.clone()))
    }

    /// Point the client at another chat-completions endpoint
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Map a gateway error status to the caller-visible error kind.
    async fn handle_error_status(&self, status: u16, response: reqwest::Response) -> ModelError {
        let message = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
        warn!(status, body = %message, "model gateway returned an error");

        match status {
            429 => ModelError::RateLimited,
            402 => ModelError::QuotaExhausted,
            _ => ModelError::Upstream { status, message },
        }
    }
}

#[async_trait]
impl ChatModel for GatewayClient {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, ModelError> {
        let payload = ChatCompletionRequest {
            model: request.model,
            messages: request.messages.iter().map(WireMessage::from).collect(),
            tools: request.tools.iter().map(WireTool::from).collect(),
            tool_choice: request.tool_choice.as_ref().map(tool_choice_value),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        debug!(
            model = %payload.model,
            messages = payload.messages.len(),
            tools = payload.tools.len(),
            "calling model gateway"
        );

        let builder = self
            .http_client
            .request(Method::POST, &self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&payload);

        let response = self.http_client.send(builder).await.map_err(|err| match err {
            SkooError::Network(msg) | SkooError::Internal(msg) => ModelError::Network(msg),
            other => ModelError::Network(format!("HTTP error: {other}")),
        })?;

        let status = response.status();
        debug!(status = status.as_u16(), "received model gateway response");

        if !status.is_success() {
            return Err(self.handle_error_status(status.as_u16(), response).await);
        }

        let body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ModelError::InvalidResponse(format!("failed to parse response: {e}")))?;

        let choice = body
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ModelError::InvalidResponse("response contained no choices".into()))?;

        Ok(Completion {
            content: choice.message.content,
            tool_calls: choice
                .message
                .tool_calls
                .unwrap_or_default()
                .into_iter()
                .map(Into::into)
                .collect(),
            finish_reason: choice.finish_reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use skoo_domain::{ChatMessage, ToolCall, ToolChoice, ToolDefinition};
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn test_client(api_url: String) -> GatewayClient {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(5))
            .max_attempts(1) // No retries in tests
            .build()
            .expect("http client");

        GatewayClient::new("test-api-key".to_string(), http_client).with_api_url(api_url)
    }

    fn request_with_tool() -> CompletionRequest {
        let mut request = CompletionRequest::new(
            "google/gemini-3-flash-preview",
            vec![ChatMessage::system("Tu es Skoo."), ChatMessage::user("Salut")],
        );
        request.tools = vec![ToolDefinition {
            name: "create_task".into(),
            description: "Créer une tâche".into(),
            parameters: json!({ "type": "object", "properties": {} }),
        }];
        request.tool_choice = Some(ToolChoice::Auto);
        request.max_tokens = Some(4096);
        request
    }

    #[tokio::test]
    async fn sends_tools_and_parses_tool_calls() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("Authorization", "Bearer test-api-key"))
            .and(body_partial_json(json!({
                "model": "google/gemini-3-flash-preview",
                "tool_choice": "auto",
                "max_tokens": 4096,
                "tools": [{ "type": "function", "function": { "name": "create_task" } }],
                "messages": [{ "role": "system" }, { "role": "user", "content": "Salut" }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{
                    "message": {
                        "content": null,
                        "tool_calls": [{
                            "id": "call_1",
                            "type": "function",
                            "function": { "name": "create_task", "arguments": "{\"title\":\"Relire\"}" }
                        }]
                    },
                    "finish_reason": "tool_calls"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(format!("{}/v1/chat/completions", server.uri()));
        let completion = client.complete(request_with_tool()).await.expect("completion");

        assert!(completion.requests_tools());
        assert_eq!(completion.content, None);
        assert_eq!(completion.finish_reason.as_deref(), Some("tool_calls"));
        assert_eq!(
            completion.tool_calls,
            vec![ToolCall {
                id: "call_1".into(),
                name: "create_task".into(),
                arguments: "{\"title\":\"Relire\"}".into()
            }]
        );
    }

    #[tokio::test]
    async fn echoes_assistant_tool_calls_and_results() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "tool_choice": { "type": "function", "function": { "name": "generate_quiz" } },
                "messages": [
                    { "role": "assistant", "content": null, "tool_calls": [{
                        "id": "call_9", "type": "function",
                        "function": { "name": "generate_quiz", "arguments": "{}" }
                    }] },
                    { "role": "tool", "tool_call_id": "call_9", "content": "{\"success\":true}" }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{ "message": { "content": "Voilà !" }, "finish_reason": "stop" }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut request = CompletionRequest::new(
            "m",
            vec![
                ChatMessage::assistant_tool_calls(
                    None,
                    vec![ToolCall {
                        id: "call_9".into(),
                        name: "generate_quiz".into(),
                        arguments: "{}".into(),
                    }],
                ),
                ChatMessage::tool_result("call_9", "{\"success\":true}"),
            ],
        );
        request.tool_choice = Some(ToolChoice::Function("generate_quiz".into()));

        let client = test_client(server.uri());
        let completion = client.complete(request).await.expect("completion");

        assert_eq!(completion.content.as_deref(), Some("Voilà !"));
        assert!(!completion.requests_tools());
    }

    #[tokio::test]
    async fn maps_rate_limit_and_quota_statuses() {
        for (status, expected) in [(429, ModelError::RateLimited), (402, ModelError::QuotaExhausted)]
        {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(status).set_body_string("slow down"))
                .mount(&server)
                .await;

            let result = test_client(server.uri()).complete(request_with_tool()).await;
            assert_eq!(result.unwrap_err(), expected);
        }
    }

    #[tokio::test]
    async fn other_statuses_carry_the_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("model overloaded"))
            .mount(&server)
            .await;

        let result = test_client(server.uri()).complete(request_with_tool()).await;

        assert_eq!(
            result.unwrap_err(),
            ModelError::Upstream { status: 500, message: "model overloaded".into() }
        );
    }

    #[tokio::test]
    async fn empty_choices_are_invalid() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let result = test_client(server.uri()).complete(request_with_tool()).await;

        assert!(matches!(result, Err(ModelError::InvalidResponse(_))));
    }
}
