//! Data models module
//!
//! This module contains the data structures exchanged with the Sender backend

pub mod account;
pub mod broadcast;
pub mod contact;
pub mod plan;
pub mod template;
pub mod user;

// Re-export commonly used models
pub use account::{MessengerAccount, MessengerType, CreateAccountRequest};
pub use broadcast::{BroadcastLog, BroadcastStatus};
pub use contact::{Contact, CreateContactRequest};
pub use plan::{SubscriptionPlan, SubscriptionPlans, PlanLimit, UNLIMITED_MESSAGES};
pub use template::{Template, CreateTemplateRequest, MAX_TEMPLATE_LENGTH};
pub use user::{User, Role, LoginRequest, LoginResponse, RegisterRequest};
