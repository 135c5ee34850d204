//! Contact service

use tracing::{debug, info};

use crate::api::ApiClient;
use crate::models::{Contact, CreateContactRequest};
use crate::session::Session;
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct ContactService {
    api: ApiClient,
}

impl ContactService {
    pub fn new(session: &Session) -> Result<Self> {
        Ok(Self { api: session.api()? })
    }

    pub async fn list(&self) -> Result<Vec<Contact>> {
        let contacts = self.api.list_contacts().await?;
        debug!(count = contacts.len(), "Fetched contacts");
        Ok(contacts)
    }

    /// Add a contact. Blank identifiers are dropped and a leading `@` is
    /// stripped from the Telegram username.
    pub async fn create(
        &self,
        name: &str,
        phone: Option<String>,
        telegram_username: Option<String>,
    ) -> Result<Contact> {
        let request = CreateContactRequest::new(name, phone, telegram_username);
        request.validate()?;

        let contact = self.api.create_contact(&request).await?;
        info!(contact_id = %contact.id, "Contact added");
        Ok(contact)
    }
}
