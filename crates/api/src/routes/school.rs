use std::sync::Arc;
use std::time::Instant;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::Json;
use skoo_core::AccessCodeOutcome;
use skoo_domain::{AccessCodeRequest, AccessCodeVerdict};

use crate::context::AppContext;
use crate::extract::lenient_json_body;
use crate::utils::logging::log_handler_execution;

/// `POST /validate-access-code` - check a school code before sign-up.
///
/// Always answers with an `{ok, title?, error?}` verdict. Any method other
/// than POST gets 405.
pub async fn validate_access_code(
    State(ctx): State<Arc<AppContext>>,
    method: Method,
    body: Bytes,
) -> (StatusCode, Json<AccessCodeVerdict>) {
    if method != Method::POST {
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            Json(AccessCodeVerdict::rejected("Méthode invalide", "Méthode non supportée")),
        );
    }

    let start = Instant::now();
    let request: AccessCodeRequest = lenient_json_body(&body);
    let outcome = ctx.access_codes.validate(&request).await;

    let status = status_for(&outcome);
    log_handler_execution("school::validate_access_code", start.elapsed(), !status.is_server_error());
    (status, Json(outcome.verdict()))
}

fn status_for(outcome: &AccessCodeOutcome) -> StatusCode {
    match outcome {
        AccessCodeOutcome::Accepted | AccessCodeOutcome::Rejected(_) => StatusCode::OK,
        AccessCodeOutcome::Malformed(_) => StatusCode::BAD_REQUEST,
        AccessCodeOutcome::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
