//! Bearer-token verification against the Supabase auth API

use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use skoo_core::{AuthenticatedUser, Authenticator};
use skoo_domain::{Result, SkooError, SupabaseConfig};
use tracing::debug;
use uuid::Uuid;

use crate::http::{decode_json, HttpClient};

#[derive(Debug, Deserialize)]
struct SupabaseUser {
    id: Uuid,
    #[serde(default)]
    email: Option<String>,
}

/// Resolves access tokens through `GET {url}/auth/v1/user`
pub struct SupabaseAuthClient {
    http_client: HttpClient,
    user_endpoint: String,
    anon_key: String,
}

impl SupabaseAuthClient {
    pub fn new(config: &SupabaseConfig, http_client: HttpClient) -> Self {
        Self {
            http_client,
            user_endpoint: format!("{}/auth/v1/user", config.url.trim_end_matches('/')),
            anon_key: config.anon_key.clone(),
        }
    }
}

#[async_trait]
impl Authenticator for SupabaseAuthClient {
    async fn authenticate(&self, token: &str) -> Result<AuthenticatedUser> {
        if token.trim().is_empty() {
            return Err(SkooError::Auth("empty bearer token".into()));
        }

        let builder = self
            .http_client
            .request(Method::GET, &self.user_endpoint)
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {token}"));

        let response = self.http_client.send(builder).await?;
        let user: SupabaseUser = decode_json(response, "supabase auth").await.map_err(|err| {
            debug!(error = %err, "bearer token rejected");
            match err {
                SkooError::Auth(msg) => SkooError::Auth(msg),
                other => SkooError::Auth(other.to_string()),
            }
        })?;

        Ok(AuthenticatedUser { id: user.id, email: user.email })
    }
}
