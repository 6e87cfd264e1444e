use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::Json;
use skoo_domain::AccessStatus;

use crate::context::AppContext;
use crate::error::ApiError;
use crate::extract::AuthUser;
use crate::utils::logging::log_handler_execution;

/// `GET /access-status` - effective tier for the caller
pub async fn status(
    State(ctx): State<Arc<AppContext>>,
    AuthUser(user): AuthUser,
) -> Result<Json<AccessStatus>, ApiError> {
    let start = Instant::now();
    let result = ctx.access.status(user.id).await;

    log_handler_execution("access::status", start.elapsed(), result.is_ok());
    Ok(Json(result?))
}
