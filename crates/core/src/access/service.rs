use std::sync::Arc;

use skoo_domain::{AccessStatus, Result, SubscriptionLookup};
use tracing::{instrument, warn};
use uuid::Uuid;

use super::ports::AccessRepository;
use super::tier::derive_access;
use crate::clock::Clock;

pub struct AccessService {
    repository: Arc<dyn AccessRepository>,
    clock: Arc<dyn Clock>,
    major_product_id: Option<String>,
}

impl AccessService {
    pub fn new(
        repository: Arc<dyn AccessRepository>,
        clock: Arc<dyn Clock>,
        major_product_id: Option<String>,
    ) -> Self {
        Self { repository, clock, major_product_id }
    }

    /// Effective access for the user; a failed subscription lookup falls
    /// back to trial rules.
    #[instrument(skip(self))]
    pub async fn status(&self, user_id: Uuid) -> Result<AccessStatus> {
        let profile = self.repository.access_profile(user_id).await?;
        let subscription = match self.repository.subscription(user_id).await {
            Ok(lookup) => lookup,
            Err(err) => {
                warn!(error = %err, "subscription lookup failed");
                SubscriptionLookup::Unavailable
            }
        };

        Ok(derive_access(&profile, &subscription, self.major_product_id.as_deref(), self.clock.now()))
    }
}
