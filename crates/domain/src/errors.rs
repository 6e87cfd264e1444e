//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Skoo
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum SkooError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A third-party service (LLM gateway, Google) answered with an error.
    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SkooError {
    /// Stable label suitable for logging fields.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Database(_) => "database",
            Self::Config(_) => "config",
            Self::Network(_) => "network",
            Self::Auth(_) => "auth",
            Self::NotFound(_) => "not_found",
            Self::InvalidInput(_) => "invalid_input",
            Self::Upstream(_) => "upstream",
            Self::Internal(_) => "internal",
        }
    }
}

/// Result type alias for Skoo operations
pub type Result<T> = std::result::Result<T, SkooError>;

/// Failure of a chat-completion call, classified by how callers must react
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Gateway answered 429
    #[error("model gateway rate limit exceeded")]
    RateLimited,

    /// Gateway answered 402
    #[error("model gateway credits exhausted")]
    QuotaExhausted,

    #[error("model gateway returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("model gateway unreachable: {0}")]
    Network(String),

    #[error("invalid model response: {0}")]
    InvalidResponse(String),
}

impl From<ModelError> for SkooError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Network(msg) => Self::Network(msg),
            other => Self::Upstream(other.to_string()),
        }
    }
}
