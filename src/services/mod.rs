//! Services module
//!
//! One service per screen of the app. Each is built from a logged-in
//! [`Session`] and talks to the backend with that session's token.

pub mod accounts;
pub mod admin;
pub mod broadcast;
pub mod contacts;
pub mod templates;

// Re-export commonly used services
pub use accounts::AccountService;
pub use admin::AdminService;
pub use broadcast::{BroadcastDraft, BroadcastPlan, BroadcastService, BroadcastSnapshot, PlannedMessage};
pub use contacts::ContactService;
pub use templates::TemplateService;

use crate::session::Session;
use crate::utils::errors::Result;

/// Service factory for creating all services from one session
#[derive(Debug, Clone)]
pub struct ServiceFactory {
    pub accounts: AccountService,
    pub contacts: ContactService,
    pub templates: TemplateService,
    pub broadcast: BroadcastService,
    pub admin: AdminService,
}

impl ServiceFactory {
    /// Fails with an authentication error when the session is not logged in
    pub fn new(session: &Session) -> Result<Self> {
        Ok(Self {
            accounts: AccountService::new(session)?,
            contacts: ContactService::new(session)?,
            templates: TemplateService::new(session)?,
            broadcast: BroadcastService::new(session)?,
            admin: AdminService::new(session)?,
        })
    }
}
