//! HTTP error responses
//!
//! Every handler failure becomes an [`ApiError`], rendered as
//! `(status, {"error": ..., "details"?: ...})`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use skoo_core::CalendarError;
use skoo_domain::constants::{AI_SERVICE_ERROR, QUOTA_EXHAUSTED_MESSAGE, RATE_LIMITED_MESSAGE};
use skoo_domain::{ModelError, SkooError};
use thiserror::Error;
use tracing::error;

pub const UNAUTHORIZED: &str = "Unauthorized";
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{}", RATE_LIMITED_MESSAGE)]
    RateLimited,

    #[error("{}", QUOTA_EXHAUSTED_MESSAGE)]
    QuotaExhausted,

    #[error("{0}")]
    Unavailable(String),

    #[error("{error}")]
    Internal { error: String, details: Option<String> },
}

impl ApiError {
    pub fn unauthorized() -> Self {
        Self::Unauthorized(UNAUTHORIZED.to_string())
    }

    pub fn internal(error: impl Into<String>) -> Self {
        Self::Internal { error: error.into(), details: None }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Internal { error: error.into(), details: Some(details.into()) }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::QuotaExhausted => StatusCode::PAYMENT_REQUIRED,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            Self::Internal { error, details: Some(details) } => {
                error!(error = %error, details = %details, "request failed");
                json!({ "error": error, "details": details })
            }
            Self::Internal { error, details: None } => {
                error!(error = %error, "request failed");
                json!({ "error": error })
            }
            other => json!({ "error": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

/// Gateway failures: 429 and 402 pass through, anything else is a 500
/// carrying the upstream message.
impl From<ModelError> for ApiError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::RateLimited => Self::RateLimited,
            ModelError::QuotaExhausted => Self::QuotaExhausted,
            ModelError::Upstream { message, .. } => Self::with_details(AI_SERVICE_ERROR, message),
            ModelError::Network(message) | ModelError::InvalidResponse(message) => {
                Self::with_details(AI_SERVICE_ERROR, message)
            }
        }
    }
}

impl From<SkooError> for ApiError {
    fn from(err: SkooError) -> Self {
        match err {
            SkooError::Auth(_) => Self::unauthorized(),
            SkooError::InvalidInput(msg) => Self::BadRequest(msg),
            SkooError::NotFound(msg) => Self::NotFound(msg),
            other => Self::with_details(INTERNAL_SERVER_ERROR, other.to_string()),
        }
    }
}

impl From<CalendarError> for ApiError {
    fn from(err: CalendarError) -> Self {
        let message = err.to_string();
        match err {
            CalendarError::NotConnected => Self::BadRequest(message),
            CalendarError::ReconnectRequired => Self::Unauthorized(message),
            CalendarError::TokenExchange(source)
            | CalendarError::TokenStorage(source)
            | CalendarError::Events(source) => {
                error!(error = %source, "google calendar request failed");
                Self::internal(message)
            }
            CalendarError::Store(source) => source.into(),
        }
    }
}
