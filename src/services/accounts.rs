//! Messenger account service

use tracing::{debug, info};

use crate::api::ApiClient;
use crate::models::{CreateAccountRequest, MessengerAccount, MessengerType};
use crate::session::Session;
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct AccountService {
    api: ApiClient,
}

impl AccountService {
    pub fn new(session: &Session) -> Result<Self> {
        Ok(Self { api: session.api()? })
    }

    pub async fn list(&self) -> Result<Vec<MessengerAccount>> {
        let accounts = self.api.list_accounts().await?;
        debug!(count = accounts.len(), "Fetched messenger accounts");
        Ok(accounts)
    }

    /// Accounts that may be chosen for a broadcast
    pub async fn list_active(&self) -> Result<Vec<MessengerAccount>> {
        Ok(self.list().await?.into_iter().filter(|a| a.is_active).collect())
    }

    pub async fn create(&self, messenger_type: MessengerType, account_name: &str) -> Result<MessengerAccount> {
        let request = CreateAccountRequest::new(messenger_type, account_name);
        request.validate()?;

        let account = self.api.create_account(&request).await?;
        info!(account_id = %account.id, messenger = %account.messenger_type, "Messenger account connected");
        Ok(account)
    }
}
