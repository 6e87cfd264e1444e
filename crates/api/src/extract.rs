//! Request extractors shared by the handlers

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use skoo_core::AuthenticatedUser;
use tracing::debug;

use crate::context::AppContext;
use crate::error::ApiError;

/// The caller, resolved from `Authorization: Bearer <token>`
///
/// Rejects with 401 `{"error":"Unauthorized"}` when the header is missing or
/// the auth backend refuses the token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub AuthenticatedUser);

impl FromRequestParts<Arc<AppContext>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &Arc<AppContext>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(ApiError::unauthorized)?;

        let user = ctx.authenticator.authenticate(token).await.map_err(|err| {
            debug!(error = %err, "bearer token rejected");
            ApiError::unauthorized()
        })?;

        Ok(Self(user))
    }
}

/// Decode a JSON request body; an empty body decodes as `null`.
pub fn json_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    let body = if body.iter().all(u8::is_ascii_whitespace) { b"null".as_slice() } else { body };
    serde_json::from_slice(body)
        .map_err(|err| ApiError::with_details("Invalid request body", err.to_string()))
}

/// Like [`json_body`], but any malformed body yields `T::default()`.
pub fn lenient_json_body<T: DeserializeOwned + Default>(body: &[u8]) -> T {
    match serde_json::from_slice::<Option<T>>(body) {
        Ok(value) => value.unwrap_or_default(),
        Err(err) => {
            debug!(error = %err, "ignoring malformed request body");
            T::default()
        }
    }
}
