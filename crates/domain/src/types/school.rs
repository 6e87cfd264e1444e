//! School access codes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An active, unexpired access code row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessCode {
    pub id: Uuid,
    pub school_id: Uuid,
    pub current_uses: Option<i32>,
    pub max_uses: Option<i32>,
    pub is_active: bool,
    pub expires_at: Option<DateTime<Utc>>,
}

impl AccessCode {
    /// Both counters must be present for the limit to apply.
    pub fn is_exhausted(&self) -> bool {
        matches!((self.current_uses, self.max_uses), (Some(used), Some(max)) if used >= max)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedStudent {
    pub id: Uuid,
    pub is_registered: bool,
}

/// Body of `POST /validate-access-code`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessCodeRequest {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Validation answer; `title`/`error` are set on rejection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessCodeVerdict {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AccessCodeVerdict {
    pub fn accepted() -> Self {
        Self { ok: true, title: None, error: None }
    }

    pub fn rejected(title: &str, error: &str) -> Self {
        Self { ok: false, title: Some(title.to_string()), error: Some(error.to_string()) }
    }
}
