//! Port interface for bearer-token verification

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use skoo_domain::Result;
use uuid::Uuid;

/// The user a request acts on behalf of
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub email: Option<String>,
}

/// Verifies access tokens issued by the managed auth backend
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Resolve a raw bearer token (without the `Bearer ` prefix).
    ///
    /// Returns `SkooError::Auth` when the token is rejected.
    async fn authenticate(&self, token: &str) -> Result<AuthenticatedUser>;
}
