use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use skoo_domain::{GoogleTokens, Result};
use uuid::Uuid;

use crate::calendar::ports::GoogleTokenRepository;

/// One token row per user, like the `google_calendar_tokens` table.
#[derive(Default, Clone)]
pub struct MemoryTokens {
    rows: Arc<Mutex<HashMap<Uuid, GoogleTokens>>>,
}

impl MemoryTokens {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, tokens: GoogleTokens) {
        self.rows.lock().unwrap().insert(tokens.user_id, tokens);
    }

    pub fn get(&self, user_id: Uuid) -> Option<GoogleTokens> {
        self.rows.lock().unwrap().get(&user_id).cloned()
    }
}

#[async_trait]
impl GoogleTokenRepository for MemoryTokens {
    async fn upsert_tokens(&self, tokens: &GoogleTokens) -> Result<()> {
        self.insert(tokens.clone());
        Ok(())
    }

    async fn find_tokens(&self, user_id: Uuid) -> Result<Option<GoogleTokens>> {
        Ok(self.get(user_id))
    }

    async fn update_access_token(
        &self,
        user_id: Uuid,
        access_token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        if let Some(row) = self.rows.lock().unwrap().get_mut(&user_id) {
            row.access_token = access_token.to_string();
            row.expires_at = expires_at;
        }
        Ok(())
    }

    async fn delete_tokens(&self, user_id: Uuid) -> Result<()> {
        self.rows.lock().unwrap().remove(&user_id);
        Ok(())
    }
}
