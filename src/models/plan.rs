//! Subscription plan model

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Backend sentinel for "no message limit"
pub const UNLIMITED_MESSAGES: i64 = -1;

/// A plan record as returned by `GET /api/subscription-plans`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionPlan {
    pub name: String,
    pub message_limit: i64,
    pub price: i64,
}

/// Plans keyed by plan id (`free`, `basic`, ...)
pub type SubscriptionPlans = BTreeMap<String, SubscriptionPlan>;

/// Monthly message allowance of a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanLimit {
    Limited(u64),
    Unlimited,
}

impl SubscriptionPlan {
    pub fn limit(&self) -> PlanLimit {
        if self.message_limit == UNLIMITED_MESSAGES {
            PlanLimit::Unlimited
        } else {
            // Any other negative value is treated as no allowance
            PlanLimit::Limited(u64::try_from(self.message_limit).unwrap_or(0))
        }
    }
}
