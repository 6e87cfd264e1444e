//! Coach message requests

use serde::{Deserialize, Serialize};

use crate::impl_domain_status_conversions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoachMessageType {
    #[default]
    Motivation,
    Greeting,
    Reminder,
    Celebration,
    Tip,
}

impl_domain_status_conversions!(CoachMessageType {
    Motivation => "motivation",
    Greeting => "greeting",
    Reminder => "reminder",
    Celebration => "celebration",
    Tip => "tip",
});

/// Progress figures the client sends with a coach request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachContext {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub total_hours_this_week: Option<f64>,
    #[serde(default)]
    pub completed_hours_this_week: Option<f64>,
    #[serde(default)]
    pub next_exam_subject: Option<String>,
    #[serde(default)]
    pub next_exam_days: Option<i64>,
    #[serde(default)]
    pub today_sessions_count: Option<u32>,
    #[serde(default)]
    pub streak_days: Option<u32>,
    #[serde(default)]
    pub last_activity: Option<String>,
}

/// Body of `POST /skoo-coach`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachRequest {
    #[serde(default)]
    pub context: CoachContext,
    #[serde(default)]
    pub message_type: Option<String>,
}

impl CoachRequest {
    /// Requested message type; missing or unrecognised values mean motivation.
    pub fn kind(&self) -> CoachMessageType {
        self.message_type.as_deref().and_then(|s| s.parse().ok()).unwrap_or_default()
    }
}

/// Kind of study aid produced by `/ai-study-tools`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudyToolKind {
    Quiz,
    Fiche,
    Flashcards,
}

impl_domain_status_conversions!(StudyToolKind {
    Quiz => "quiz",
    Fiche => "fiche",
    Flashcards => "flashcards",
});

/// Body of `POST /ai-study-tools`; `type` stays a string so unknown kinds
/// can be reported with their original spelling.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudyToolRequest {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub content: Option<String>,
}
