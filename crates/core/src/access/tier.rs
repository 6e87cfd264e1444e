//! Tier precedence: lifetime, then school, then paid subscription, then trial

use chrono::{DateTime, Duration, Utc};
use skoo_domain::constants::TRIAL_DURATION_DAYS;
use skoo_domain::{
    AccessProfile, AccessSource, AccessStatus, SubscriptionLookup, SubscriptionTier, TrialInfo,
};

const SECONDS_PER_DAY: i64 = 86_400;

/// Derive the effective access of a user.
///
/// `major_product_id` identifies the product that grants `major`; any other
/// active product grants `student`.
pub fn derive_access(
    profile: &AccessProfile,
    subscription: &SubscriptionLookup,
    major_product_id: Option<&str>,
    now: DateTime<Utc>,
) -> AccessStatus {
    if let Some(tier) = profile.lifetime_tier {
        return granted(tier, AccessSource::Lifetime);
    }

    if profile.active_school_member {
        return granted(SubscriptionTier::Major, AccessSource::School);
    }

    if let SubscriptionLookup::Active { product_id } = subscription {
        let tier = match (product_id.as_deref(), major_product_id) {
            (Some(product), Some(major)) if product == major => SubscriptionTier::Major,
            _ => SubscriptionTier::Student,
        };
        return granted(tier, AccessSource::Subscription);
    }

    let trial = trial_info(profile, now);
    if trial.is_trialing {
        AccessStatus {
            subscribed: true,
            tier: Some(trial.selected_tier.unwrap_or(SubscriptionTier::Student)),
            source: AccessSource::Trial,
            trial,
        }
    } else {
        AccessStatus { subscribed: false, tier: None, source: AccessSource::None, trial }
    }
}

/// Trial window of [`TRIAL_DURATION_DAYS`] from `trial_started_at`.
pub fn trial_info(profile: &AccessProfile, now: DateTime<Utc>) -> TrialInfo {
    let Some(started_at) = profile.trial_started_at else {
        return TrialInfo { selected_tier: profile.selected_tier, ..TrialInfo::default() };
    };

    let ends_at = started_at + Duration::days(TRIAL_DURATION_DAYS);
    let expired = now > ends_at;
    let remaining_secs = (ends_at - now).num_seconds();
    // ceil to whole days, never negative
    let days_remaining =
        if expired { 0 } else { (remaining_secs + SECONDS_PER_DAY - 1).div_euclid(SECONDS_PER_DAY).max(0) };

    TrialInfo {
        is_trialing: !expired,
        trial_expired: expired,
        selected_tier: Some(profile.selected_tier.unwrap_or(SubscriptionTier::Student)),
        trial_started_at: Some(started_at),
        trial_ends_at: Some(ends_at),
        days_remaining: Some(days_remaining),
    }
}

fn granted(tier: SubscriptionTier, source: AccessSource) -> AccessStatus {
    AccessStatus { subscribed: true, tier: Some(tier), source, trial: TrialInfo::default() }
}
