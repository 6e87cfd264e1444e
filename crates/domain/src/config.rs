//! Configuration structures
//!
//! Loaded by `skoo_infra::config` from the environment or a JSON/TOML file.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_COPILOT_MAX_ROUNDS, DEFAULT_COPILOT_MAX_TOKENS, DEFAULT_COPILOT_MODEL,
    DEFAULT_GATEWAY_MODEL, DEFAULT_GATEWAY_URL, DEFAULT_LLM_TIMEOUT_SECS,
};

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub llm: LlmConfig,
    pub supabase: SupabaseConfig,
    #[serde(default)]
    pub google: Option<GoogleConfig>,
    #[serde(default)]
    pub copilot: CopilotConfig,
    #[serde(default)]
    pub billing: BillingConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 8080 }
    }
}

impl ServerConfig {
    /// `host:port` string accepted by `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Postgres connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// libpq-style connection string or `postgres://` URL
    pub url: String,
    /// Use TLS for the connection (disabled for local development)
    #[serde(default = "default_true")]
    pub tls: bool,
}

/// OpenAI-compatible chat-completions gateway settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_gateway_url")]
    pub api_url: String,
    pub api_key: String,
    /// Model used by the study tools and the coach
    #[serde(default = "default_gateway_model")]
    pub model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_seconds: u64,
}

/// Managed-backend auth settings used to verify bearer tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
}

/// Google OAuth client credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,
}

/// Copilot tool-loop settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopilotConfig {
    pub model: String,
    pub max_tokens: u32,
    /// Hard cap on model round-trips per request
    pub max_rounds: usize,
}

impl Default for CopilotConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_COPILOT_MODEL.to_string(),
            max_tokens: DEFAULT_COPILOT_MAX_TOKENS,
            max_rounds: DEFAULT_COPILOT_MAX_ROUNDS,
        }
    }
}

/// Product identifiers used to map an active subscription to a tier
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BillingConfig {
    #[serde(default)]
    pub major_product_id: Option<String>,
}

const fn default_true() -> bool {
    true
}

fn default_gateway_url() -> String {
    DEFAULT_GATEWAY_URL.to_string()
}

fn default_gateway_model() -> String {
    DEFAULT_GATEWAY_MODEL.to_string()
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_LLM_TIMEOUT_SECS
}
