//! Sender client
//!
//! Client library for the Sender messaging-broadcast service. It provides the
//! auth session, a typed REST client, services for accounts, contacts,
//! templates, broadcasts and administration, and the pure broadcast
//! eligibility evaluator.

pub mod api;
pub mod config;
pub mod eligibility;
pub mod models;
pub mod services;
pub mod session;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{SenderError, Result};

// Re-export main components for easy access
pub use api::ApiClient;
pub use eligibility::{evaluate, BroadcastRequest, Evaluation, PlanTable, TemplateMode, TemplateSelection};
pub use services::ServiceFactory;
pub use session::{FileTokenStore, Session, SessionState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
