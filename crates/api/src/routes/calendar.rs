//! `/google-calendar?action=...` - Google Calendar connection and events
//!
//! Actions: `auth-url`, `callback`, `status`, `disconnect`, `events`.

use std::sync::Arc;
use std::time::Instant;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use skoo_core::CalendarService;
use uuid::Uuid;

use crate::context::AppContext;
use crate::error::ApiError;
use crate::extract::{lenient_json_body, AuthUser};
use crate::utils::logging::log_handler_execution;

#[derive(Debug, Default, Deserialize)]
pub struct CalendarQuery {
    pub action: Option<String>,
    pub redirect_uri: Option<String>,
    pub time_min: Option<String>,
    pub time_max: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct CallbackBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    redirect_uri: Option<String>,
}

pub async fn dispatch(
    State(ctx): State<Arc<AppContext>>,
    AuthUser(user): AuthUser,
    Query(query): Query<CalendarQuery>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let start = Instant::now();
    let action = query.action.clone().unwrap_or_default();

    let result = handle(&ctx, user.id, &action, query, &body).await;

    log_handler_execution("calendar::dispatch", start.elapsed(), result.is_ok());
    result.map(Json)
}

async fn handle(
    ctx: &AppContext,
    user_id: Uuid,
    action: &str,
    query: CalendarQuery,
    body: &[u8],
) -> Result<Value, ApiError> {
    match action {
        "auth-url" => {
            let redirect_uri = required(query.redirect_uri, "redirect_uri is required")?;
            let url = service(ctx)?.authorization_url(user_id, &redirect_uri)?;
            Ok(json!({ "url": url }))
        }
        "callback" => {
            let callback: CallbackBody = lenient_json_body(body);
            let (code, redirect_uri) =
                match (non_empty(callback.code), non_empty(callback.redirect_uri)) {
                    (Some(code), Some(redirect_uri)) => (code, redirect_uri),
                    _ => {
                        return Err(ApiError::BadRequest(
                            "code and redirect_uri are required".to_string(),
                        ))
                    }
                };
            service(ctx)?.connect(user_id, &code, &redirect_uri).await?;
            Ok(json!({ "success": true }))
        }
        "status" => {
            let connected = service(ctx)?.is_connected(user_id).await?;
            Ok(json!({ "connected": connected }))
        }
        "disconnect" => {
            service(ctx)?.disconnect(user_id).await?;
            Ok(json!({ "success": true }))
        }
        "events" => {
            let (time_min, time_max) =
                match (non_empty(query.time_min), non_empty(query.time_max)) {
                    (Some(min), Some(max)) => (min, max),
                    _ => {
                        return Err(ApiError::BadRequest(
                            "time_min and time_max are required".to_string(),
                        ))
                    }
                };
            let events = service(ctx)?.events(user_id, &time_min, &time_max).await?;
            Ok(json!({ "events": events }))
        }
        _ => Err(ApiError::BadRequest("Invalid action".to_string())),
    }
}

fn service(ctx: &AppContext) -> Result<&CalendarService, ApiError> {
    ctx.calendar
        .as_ref()
        .ok_or_else(|| ApiError::Unavailable("Google Calendar is not configured".to_string()))
}

fn required(value: Option<String>, message: &str) -> Result<String, ApiError> {
    non_empty(value).ok_or_else(|| ApiError::BadRequest(message.to_string()))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
