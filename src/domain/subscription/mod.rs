//! Subscription domain module

mod quota;

pub use quota::{
    check_quota, PlanType, QuotaCheck, QuotaError, QuotaWarning, SubscriptionSnapshot,
    NEAR_QUOTA_PERCENT,
};
