//! Plan limit table
//!
//! One table resolves plan ids to message allowances. It is normally built from
//! the backend's plan records; the builtin table mirrors the backend defaults
//! for use before plans have been fetched.

use std::collections::BTreeMap;

use crate::models::{PlanLimit, SubscriptionPlans};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanTable {
    limits: BTreeMap<String, PlanLimit>,
}

impl PlanTable {
    /// Backend default plans
    pub fn builtin() -> Self {
        let limits = [
            ("free", PlanLimit::Limited(10)),
            ("basic", PlanLimit::Limited(1000)),
            ("professional", PlanLimit::Limited(5000)),
            ("corporate", PlanLimit::Limited(20000)),
            ("unlimited", PlanLimit::Unlimited),
        ]
        .into_iter()
        .map(|(id, limit)| (id.to_string(), limit))
        .collect();

        Self { limits }
    }

    pub fn from_plans(plans: &SubscriptionPlans) -> Self {
        let limits = plans
            .iter()
            .map(|(id, plan)| (id.clone(), plan.limit()))
            .collect();

        Self { limits }
    }

    /// Unknown plans get a zero allowance, which blocks every send
    pub fn limit_for(&self, plan_id: &str) -> PlanLimit {
        self.limits
            .get(plan_id)
            .copied()
            .unwrap_or(PlanLimit::Limited(0))
    }

    pub fn contains(&self, plan_id: &str) -> bool {
        self.limits.contains_key(plan_id)
    }

    pub fn plan_ids(&self) -> impl Iterator<Item = &str> {
        self.limits.keys().map(String::as_str)
    }
}

impl Default for PlanTable {
    fn default() -> Self {
        Self::builtin()
    }
}
