//! Port interfaces for the copilot tools
//!
//! Every method takes the authenticated user's id; implementations must
//! scope reads and writes to that user.

use async_trait::async_trait;
use chrono::NaiveDate;
use skoo_domain::{
    CreatedDeck, NewFlashcardDeck, NewRevisionSession, NewTask, Result, RevisionSession,
    SessionStatus, Task,
};
use uuid::Uuid;

/// Study planning rows the copilot may read and write
#[async_trait]
pub trait StudyRepository: Send + Sync {
    /// Insert a `planned` session.
    ///
    /// Fails with `SkooError::NotFound` and inserts nothing when the subject
    /// does not belong to `user_id`.
    async fn create_revision_session(
        &self,
        user_id: Uuid,
        session: NewRevisionSession,
    ) -> Result<RevisionSession>;

    /// Set the status of one of the user's sessions.
    async fn update_session_status(
        &self,
        user_id: Uuid,
        session_id: Uuid,
        status: SessionStatus,
    ) -> Result<()>;

    /// Insert a `todo` task.
    async fn create_task(&self, user_id: Uuid, task: NewTask) -> Result<Task>;

    /// Sessions dated on or after `from`.
    async fn sessions_since(&self, user_id: Uuid, from: NaiveDate) -> Result<Vec<RevisionSession>>;

    /// Insert a deck, then its cards.
    async fn create_flashcard_deck(
        &self,
        user_id: Uuid,
        deck: NewFlashcardDeck,
    ) -> Result<CreatedDeck>;
}
