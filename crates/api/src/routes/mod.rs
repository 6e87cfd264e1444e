//! HTTP routes - one per backend function

mod access;
mod calendar;
mod coach;
mod copilot;
mod health;
mod reminders;
mod school;
mod study_tools;

use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{any, get, post};
use axum::Router;
use tower::ServiceBuilder;
use tracing::info;

use crate::context::AppContext;
use crate::utils::logging::duration_ms;

/// Build the application router over a shared context.
pub fn router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/skoo-copilot", post(copilot::run))
        .route("/ai-study-tools", post(study_tools::generate))
        .route("/skoo-coach", post(coach::message))
        .route("/google-calendar", get(calendar::dispatch).post(calendar::dispatch))
        .route("/send-session-reminders", post(reminders::session_reminders))
        .route("/send-exam-reminders", post(reminders::exam_reminders))
        .route("/validate-access-code", any(school::validate_access_code))
        .route("/access-status", get(access::status))
        .route("/health", get(health::health))
        .layer(ServiceBuilder::new().layer(middleware::from_fn(log_request)))
        .with_state(ctx)
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let start = Instant::now();

    let response = next.run(request).await;

    info!(
        %method,
        path = %path,
        status = response.status().as_u16(),
        duration_ms = duration_ms(start.elapsed()),
        "request"
    );
    response
}
