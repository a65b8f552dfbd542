//! Subscription snapshot and quota gating

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::audio::DurationEstimate;

/// Usage percentage above which the user is asked to confirm
pub const NEAR_QUOTA_PERCENT: i64 = 90;

/// Subscription tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    /// Metered tier subject to quota gating
    Starter,
    /// Unmetered tier
    Unlimited,
    /// Any tier this client does not know; treated as unmetered
    #[serde(untagged)]
    Other(String),
}

impl PlanType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Starter => "starter",
            Self::Unlimited => "unlimited",
            Self::Other(s) => s,
        }
    }

    /// Whether uploads on this plan are checked against the monthly quota
    pub fn is_metered(&self) -> bool {
        matches!(self, Self::Starter)
    }
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only view of a user's subscription, fetched once per upload attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionSnapshot {
    pub plan_type: PlanType,
    #[serde(rename = "minutes_quota")]
    pub quota_minutes: i64,
    #[serde(rename = "minutes_used_this_month")]
    pub used_minutes: i64,
}

impl SubscriptionSnapshot {
    pub fn new(plan_type: PlanType, quota_minutes: i64, used_minutes: i64) -> Self {
        Self {
            plan_type,
            quota_minutes,
            used_minutes,
        }
    }

    /// Minutes left this month (negative when over quota)
    pub fn remaining_minutes(&self) -> i64 {
        self.quota_minutes - self.used_minutes
    }
}

/// Reasons an upload is refused before anything is created
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuotaError {
    #[error("Impossible de détecter la durée du fichier audio. Pour protéger votre quota, ce fichier ne peut pas être traité : essayez un autre format (MP3, WAV, M4A recommandés) ou contactez le support.")]
    DurationUnknown,

    #[error("Quota de minutes atteint : vous avez utilisé toutes vos minutes ce mois-ci ({quota} min). Votre quota se renouvellera le mois prochain, ou vous pouvez passer à la formule Illimitée.")]
    QuotaExhausted { quota: i64 },

    #[error("Upload impossible : ce fichier audio dure {requested} minutes, mais il ne vous reste que {remaining} minutes ce mois-ci (il manque {} minutes). Attendez le renouvellement de votre quota ou passez à la formule Illimitée.", .requested - .remaining)]
    QuotaWouldExceed { requested: i64, remaining: i64 },
}

/// Non-blocking warning raised when an upload would push usage past 90%
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaWarning {
    /// Minutes this upload will consume
    pub minutes: i64,
    /// Minutes left once the upload is counted
    pub remaining_after: i64,
}

impl fmt::Display for QuotaWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Attention : après cet upload ({} min), il vous restera seulement {} minutes ce mois-ci.",
            self.minutes, self.remaining_after
        )
    }
}

/// Outcome of a successful quota check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaCheck {
    /// Plan is not metered, nothing was checked
    Unmetered,
    /// Upload fits comfortably
    WithinQuota,
    /// Upload fits but leaves less than 10% of the quota
    NearLimit(QuotaWarning),
}

/// Gate an upload of `duration` against `subscription`.
///
/// Only starter plans are checked. An unknown duration is refused so that
/// uploads can never go unmetered.
pub fn check_quota(
    subscription: &SubscriptionSnapshot,
    duration: DurationEstimate,
) -> Result<QuotaCheck, QuotaError> {
    if !subscription.plan_type.is_metered() {
        return Ok(QuotaCheck::Unmetered);
    }

    if duration.is_unknown() {
        return Err(QuotaError::DurationUnknown);
    }

    let quota = subscription.quota_minutes;
    let used = subscription.used_minutes;

    if used >= quota {
        return Err(QuotaError::QuotaExhausted { quota });
    }

    let minutes = duration.billable_minutes() as i64;
    let remaining = quota - used;
    if minutes > remaining {
        return Err(QuotaError::QuotaWouldExceed {
            requested: minutes,
            remaining,
        });
    }

    let usage_after = used + minutes;
    if usage_after * 100 > quota * NEAR_QUOTA_PERCENT {
        return Ok(QuotaCheck::NearLimit(QuotaWarning {
            minutes,
            remaining_after: quota - usage_after,
        }));
    }

    Ok(QuotaCheck::WithinQuota)
}
