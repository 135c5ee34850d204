//! Message template model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::errors::{SenderError, Result};

/// Maximum template length in characters
pub const MAX_TEMPLATE_LENGTH: usize = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub content: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTemplateRequest {
    pub name: String,
    pub content: String,
}

impl CreateTemplateRequest {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            content: content.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(SenderError::validation("Template name is required"));
        }
        if self.content.trim().is_empty() {
            return Err(SenderError::validation("Template content is required"));
        }
        let length = self.content.chars().count();
        if length > MAX_TEMPLATE_LENGTH {
            return Err(SenderError::validation(format!(
                "Template content is {} characters, the maximum is {}",
                length, MAX_TEMPLATE_LENGTH
            )));
        }
        Ok(())
    }
}
