use std::sync::Arc;
use std::time::Instant;

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};
use skoo_core::StudyToolError;
use skoo_domain::{ModelError, StudyToolRequest};
use tracing::warn;

use crate::context::AppContext;
use crate::error::ApiError;
use crate::extract::json_body;
use crate::utils::logging::log_handler_execution;

const GATEWAY_ERROR: &str = "AI gateway error";

/// `POST /ai-study-tools` - generate a quiz, a revision sheet or flashcards.
pub async fn generate(
    State(ctx): State<Arc<AppContext>>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let start = Instant::now();
    let request: StudyToolRequest = json_body(&body)?;

    let result = ctx
        .study_tools
        .generate(&request)
        .await
        .map(|result| Json(json!({ "result": result })))
        .map_err(study_tool_error);

    log_handler_execution("study_tools::generate", start.elapsed(), result.is_ok());
    result
}

fn study_tool_error(err: StudyToolError) -> ApiError {
    match err {
        StudyToolError::Model(ModelError::RateLimited) => ApiError::RateLimited,
        StudyToolError::Model(ModelError::QuotaExhausted) => ApiError::QuotaExhausted,
        StudyToolError::Model(other) => {
            warn!(error = %other, "study tool generation failed");
            ApiError::internal(GATEWAY_ERROR)
        }
        other => ApiError::internal(other.to_string()),
    }
}
