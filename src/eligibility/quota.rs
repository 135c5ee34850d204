//! Monthly message quota

use crate::models::{PlanLimit, User};
use super::plans::PlanTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaStatus {
    /// The user flag or the plan lifts the limit
    Unlimited,
    /// The broadcast fits in the remaining allowance
    Within { limit: u64, sent: u64, remaining: u64 },
    /// Nothing left this month
    Exhausted { limit: u64, sent: u64 },
    /// Some allowance is left, but not enough for this broadcast
    Exceeded { limit: u64, sent: u64, remaining: u64, requested: u64 },
}

impl QuotaStatus {
    pub fn allows(&self) -> bool {
        matches!(self, QuotaStatus::Unlimited | QuotaStatus::Within { .. })
    }

    /// Quota headroom, `None` when unlimited
    pub fn remaining(&self) -> Option<u64> {
        match *self {
            QuotaStatus::Unlimited => None,
            QuotaStatus::Within { remaining, .. } => Some(remaining),
            QuotaStatus::Exhausted { .. } => Some(0),
            QuotaStatus::Exceeded { remaining, .. } => Some(remaining),
        }
    }
}

/// Check whether `requested` more messages fit in the user's plan this month
pub fn check_quota(user: &User, plans: &PlanTable, requested: u64) -> QuotaStatus {
    if user.is_unlimited {
        return QuotaStatus::Unlimited;
    }

    let limit = match plans.limit_for(&user.subscription_plan) {
        PlanLimit::Unlimited => return QuotaStatus::Unlimited,
        PlanLimit::Limited(limit) => limit,
    };
    let sent = user.messages_sent_this_month;

    if sent >= limit {
        return QuotaStatus::Exhausted { limit, sent };
    }

    let remaining = limit - sent;
    if requested > remaining {
        QuotaStatus::Exceeded { limit, sent, remaining, requested }
    } else {
        QuotaStatus::Within { limit, sent, remaining }
    }
}
