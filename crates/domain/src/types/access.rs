//! Subscription tiers and trial state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::impl_domain_status_conversions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    Free,
    Student,
    Major,
}

impl_domain_status_conversions!(SubscriptionTier {
    Free => "free",
    Student => "student",
    Major => "major",
});

/// Profile columns and memberships that grant access
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessProfile {
    pub lifetime_tier: Option<SubscriptionTier>,
    pub selected_tier: Option<SubscriptionTier>,
    pub trial_started_at: Option<DateTime<Utc>>,
    pub active_school_member: bool,
}

/// Outcome of looking up a paid subscription
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionLookup {
    Active { product_id: Option<String> },
    Inactive,
    /// The billing lookup failed; trial rules still apply.
    Unavailable,
}

/// Which rule granted (or refused) access
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessSource {
    Lifetime,
    School,
    Subscription,
    Trial,
    None,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialInfo {
    pub is_trialing: bool,
    pub trial_expired: bool,
    pub selected_tier: Option<SubscriptionTier>,
    pub trial_started_at: Option<DateTime<Utc>>,
    pub trial_ends_at: Option<DateTime<Utc>>,
    pub days_remaining: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessStatus {
    pub subscribed: bool,
    pub tier: Option<SubscriptionTier>,
    pub source: AccessSource,
    pub trial: TrialInfo,
}
