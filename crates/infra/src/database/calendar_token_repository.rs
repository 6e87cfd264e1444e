//! Google OAuth token storage, one row per user

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use skoo_core::GoogleTokenRepository;
use skoo_domain::{GoogleTokens, Result};
use uuid::Uuid;

use super::manager::PgManager;
use super::rows::column;
use crate::errors::db_error;

pub struct PgGoogleTokenRepository {
    db: Arc<PgManager>,
}

impl PgGoogleTokenRepository {
    pub fn new(db: Arc<PgManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GoogleTokenRepository for PgGoogleTokenRepository {
    async fn upsert_tokens(&self, tokens: &GoogleTokens) -> Result<()> {
        self.db
            .client()
            .await?
            .execute(
                "INSERT INTO google_calendar_tokens
                     (user_id, access_token, refresh_token, token_expires_at, updated_at)
                 VALUES ($1, $2, $3, $4, now())
                 ON CONFLICT (user_id) DO UPDATE SET
                     access_token = EXCLUDED.access_token,
                     refresh_token = EXCLUDED.refresh_token,
                     token_expires_at = EXCLUDED.token_expires_at,
                     updated_at = now()",
                &[&tokens.user_id, &tokens.access_token, &tokens.refresh_token, &tokens.expires_at],
            )
            .await
            .map_err(db_error)?;
        Ok(())
    }

    async fn find_tokens(&self, user_id: Uuid) -> Result<Option<GoogleTokens>> {
        let row = self
            .db
            .client()
            .await?
            .query_opt(
                "SELECT user_id, access_token, refresh_token, token_expires_at
                 FROM google_calendar_tokens WHERE user_id = $1",
                &[&user_id],
            )
            .await
            .map_err(db_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let refresh_token: Option<String> = column(&row, "refresh_token")?;
        Ok(Some(GoogleTokens {
            user_id: column(&row, "user_id")?,
            access_token: column(&row, "access_token")?,
            refresh_token: refresh_token.unwrap_or_default(),
            expires_at: column(&row, "token_expires_at")?,
        }))
    }

    async fn update_access_token(
        &self,
        user_id: Uuid,
        access_token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        self.db
            .client()
            .await?
            .execute(
                "UPDATE google_calendar_tokens
                 SET access_token = $2, token_expires_at = $3, updated_at = now()
                 WHERE user_id = $1",
                &[&user_id, &access_token, &expires_at],
            )
            .await
            .map_err(db_error)?;
        Ok(())
    }

    async fn delete_tokens(&self, user_id: Uuid) -> Result<()> {
        self.db
            .client()
            .await?
            .execute("DELETE FROM google_calendar_tokens WHERE user_id = $1", &[&user_id])
            .await
            .map_err(db_error)?;
        Ok(())
    }
}
