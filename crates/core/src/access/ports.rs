use async_trait::async_trait;
use skoo_domain::{AccessProfile, Result, SubscriptionLookup};
use uuid::Uuid;

#[async_trait]
pub trait AccessRepository: Send + Sync {
    /// Lifetime tier, selected tier, trial start and school membership.
    async fn access_profile(&self, user_id: Uuid) -> Result<AccessProfile>;

    /// Current paid subscription, if any.
    async fn subscription(&self, user_id: Uuid) -> Result<SubscriptionLookup>;
}
