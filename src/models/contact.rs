//! Contact model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::account::MessengerType;
use crate::utils::errors::{SenderError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub telegram_username: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Contact {
    /// Identifier used to reach this contact on the given messenger.
    /// Blank values count as missing.
    pub fn identifier_for(&self, messenger_type: MessengerType) -> Option<&str> {
        let value = match messenger_type {
            MessengerType::Telegram => self.telegram_username.as_deref(),
            MessengerType::Whatsapp => self.phone.as_deref(),
        };
        value.map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn is_reachable_via(&self, messenger_type: MessengerType) -> bool {
        self.identifier_for(messenger_type).is_some()
    }
}

/// Sent as query parameters, matching the backend's contact endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateContactRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram_username: Option<String>,
}

impl CreateContactRequest {
    pub fn new(name: impl Into<String>, phone: Option<String>, telegram_username: Option<String>) -> Self {
        let clean = |v: Option<String>| {
            v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        };
        Self {
            name: name.into().trim().to_string(),
            phone: clean(phone),
            telegram_username: clean(telegram_username)
                .map(|u| u.trim_start_matches('@').to_string())
                .filter(|u| !u.is_empty()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(SenderError::validation("Contact name is required"));
        }
        if self.phone.is_none() && self.telegram_username.is_none() {
            return Err(SenderError::validation(
                "Provide a phone number or a Telegram username",
            ));
        }
        Ok(())
    }
}
