//! Messenger account model

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::errors::{SenderError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessengerType {
    Telegram,
    Whatsapp,
}

impl MessengerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessengerType::Telegram => "telegram",
            MessengerType::Whatsapp => "whatsapp",
        }
    }
}

impl fmt::Display for MessengerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for MessengerType {
    type Err = SenderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "telegram" => Ok(MessengerType::Telegram),
            "whatsapp" => Ok(MessengerType::Whatsapp),
            other => Err(SenderError::validation(format!("Invalid messenger type: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessengerAccount {
    pub id: Uuid,
    pub user_id: Uuid,
    pub messenger_type: MessengerType,
    pub account_name: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccountRequest {
    pub messenger_type: MessengerType,
    pub account_name: String,
}

impl CreateAccountRequest {
    pub fn new(messenger_type: MessengerType, account_name: impl Into<String>) -> Self {
        Self {
            messenger_type,
            account_name: account_name.into().trim().to_string(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.account_name.is_empty() {
            return Err(SenderError::validation("Account name is required"));
        }
        Ok(())
    }
}
