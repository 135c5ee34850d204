//! Administration service
//!
//! User management and plan pricing. Every operation checks the admin role
//! locally before any request is made; the backend enforces it again.

use uuid::Uuid;

use crate::api::{ApiClient, ApiMessage};
use crate::eligibility::PlanTable;
use crate::models::{SubscriptionPlans, User};
use crate::session::Session;
use crate::utils::errors::{SenderError, Result};
use crate::utils::logging::log_admin_action;

#[derive(Debug, Clone)]
pub struct AdminService {
    api: ApiClient,
    actor: User,
}

impl AdminService {
    pub fn new(session: &Session) -> Result<Self> {
        Ok(Self {
            api: session.api()?,
            actor: session.require_user()?.clone(),
        })
    }

    fn require_admin(&self) -> Result<()> {
        if !self.actor.is_admin() {
            return Err(SenderError::PermissionDenied("Admin access required".to_string()));
        }
        Ok(())
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.require_admin()?;
        self.api.list_users().await
    }

    pub async fn set_unlimited(&self, user_id: Uuid, is_unlimited: bool) -> Result<ApiMessage> {
        self.require_admin()?;

        let message = self.api.set_unlimited(user_id, is_unlimited).await?;
        let action = if is_unlimited { "grant_unlimited" } else { "revoke_unlimited" };
        log_admin_action(&self.actor.username, action, Some(&user_id.to_string()), None);
        Ok(message)
    }

    /// Move a user to another plan. The plan must exist on the backend.
    pub async fn set_subscription(&self, user_id: Uuid, plan: &str) -> Result<ApiMessage> {
        self.require_admin()?;

        let plans = PlanTable::from_plans(&self.api.subscription_plans().await?);
        if !plans.contains(plan) {
            return Err(SenderError::validation(format!("Unknown subscription plan: {}", plan)));
        }

        let message = self.api.set_subscription(user_id, plan).await?;
        log_admin_action(&self.actor.username, "set_subscription", Some(&user_id.to_string()), Some(plan));
        Ok(message)
    }

    pub async fn list_plans(&self) -> Result<SubscriptionPlans> {
        self.api.subscription_plans().await
    }

    pub async fn update_plan_price(&self, plan_id: &str, price: i64) -> Result<ApiMessage> {
        self.require_admin()?;

        if price < 0 {
            return Err(SenderError::validation("Price cannot be negative"));
        }
        let plans = self.api.subscription_plans().await?;
        if !plans.contains_key(plan_id) {
            return Err(SenderError::validation(format!("Unknown subscription plan: {}", plan_id)));
        }

        let message = self.api.update_plan_price(plan_id, price).await?;
        log_admin_action(&self.actor.username, "update_plan_price", Some(plan_id), Some(&price.to_string()));
        Ok(message)
    }
}
