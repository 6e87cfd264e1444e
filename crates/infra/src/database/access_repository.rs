//! Profile, school membership and subscription lookups for access tiers

use std::sync::Arc;

use async_trait::async_trait;
use skoo_core::AccessRepository;
use skoo_domain::{AccessProfile, Result, SubscriptionLookup, SubscriptionTier};
use tracing::warn;
use uuid::Uuid;

use super::manager::PgManager;
use super::rows::{column, parse_enum};
use crate::errors::db_error;

pub struct PgAccessRepository {
    db: Arc<PgManager>,
}

impl PgAccessRepository {
    pub fn new(db: Arc<PgManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccessRepository for PgAccessRepository {
    async fn access_profile(&self, user_id: Uuid) -> Result<AccessProfile> {
        let client = self.db.client().await?;

        let profile = client
            .query_opt(
                "SELECT lifetime_tier, selected_tier, trial_started_at FROM profiles WHERE id = $1",
                &[&user_id],
            )
            .await
            .map_err(db_error)?;

        let membership = client
            .query_one(
                "SELECT EXISTS (
                     SELECT 1 FROM school_members WHERE user_id = $1 AND is_active = true
                 )",
                &[&user_id],
            )
            .await
            .map_err(db_error)?;
        let active_school_member: bool = membership.try_get(0).map_err(db_error)?;

        let Some(row) = profile else {
            return Ok(AccessProfile { active_school_member, ..AccessProfile::default() });
        };

        let lifetime: Option<String> = column(&row, "lifetime_tier")?;
        let selected: Option<String> = column(&row, "selected_tier")?;
        Ok(AccessProfile {
            lifetime_tier: tier_or_none(lifetime.as_deref()),
            selected_tier: tier_or_none(selected.as_deref()),
            trial_started_at: column(&row, "trial_started_at")?,
            active_school_member,
        })
    }

    async fn subscription(&self, user_id: Uuid) -> Result<SubscriptionLookup> {
        let row = self
            .db
            .client()
            .await?
            .query_opt(
                "SELECT product_id FROM subscriptions
                 WHERE user_id = $1 AND status IN ('active', 'trialing')
                 LIMIT 1",
                &[&user_id],
            )
            .await
            .map_err(db_error)?;

        match row {
            Some(row) => Ok(SubscriptionLookup::Active { product_id: column(&row, "product_id")? }),
            None => Ok(SubscriptionLookup::Inactive),
        }
    }
}

/// Unknown tier text is treated as absent rather than failing the lookup.
fn tier_or_none(raw: Option<&str>) -> Option<SubscriptionTier> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    match parse_enum(raw) {
        Ok(tier) => Some(tier),
        Err(err) => {
            warn!(error = %err, "ignoring unknown tier value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_text_is_lenient() {
        assert_eq!(tier_or_none(Some("major")), Some(SubscriptionTier::Major));
        assert_eq!(tier_or_none(Some(" Student ")), Some(SubscriptionTier::Student));
        assert_eq!(tier_or_none(Some("")), None);
        assert_eq!(tier_or_none(Some("platinum")), None);
        assert_eq!(tier_or_none(None), None);
    }
}
