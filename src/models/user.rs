//! User model

use std::sync::OnceLock;

use chrono::NaiveDateTime;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::errors::{SenderError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub role: Role,
    /// Plan id as stored by the backend; may name a plan the client does not know
    pub subscription_plan: String,
    pub is_unlimited: bool,
    pub messages_sent_this_month: u64,
    pub created_at: NaiveDateTime,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: User,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<()> {
        validate_email(&self.email)?;
        if self.password.is_empty() {
            return Err(SenderError::validation("Password is required"));
        }
        Ok(())
    }
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<()> {
        validate_email(&self.email)?;
        if self.username.trim().is_empty() {
            return Err(SenderError::validation("Username is required"));
        }
        if self.password.is_empty() {
            return Err(SenderError::validation("Password is required"));
        }
        Ok(())
    }
}

fn validate_email(email: &str) -> Result<()> {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    let re = EMAIL.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
    });

    if email.trim().is_empty() {
        return Err(SenderError::validation("Email is required"));
    }
    if !re.is_match(email.trim()) {
        return Err(SenderError::validation(format!("Invalid email address: {}", email)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_deserializes_backend_payload() {
        let json = r#"{
            "id": "6f1c2a4e-8a52-4a5b-9d0c-6f0e3e2b9d11",
            "email": "admin@sender.app",
            "username": "admin",
            "role": "admin",
            "subscription_plan": "unlimited",
            "is_unlimited": true,
            "messages_sent_this_month": 0,
            "created_at": "2024-05-01T10:20:30.123456"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert!(user.is_admin());
        assert_eq!(user.subscription_plan, "unlimited");
    }

    #[test]
    fn test_login_validation() {
        let ok = LoginRequest { email: "a@b.io".into(), password: "secret".into() };
        assert!(ok.validate().is_ok());

        let bad_email = LoginRequest { email: "not-an-email".into(), password: "secret".into() };
        assert!(matches!(bad_email.validate(), Err(SenderError::Validation(_))));

        let no_password = LoginRequest { email: "a@b.io".into(), password: String::new() };
        assert_eq!(no_password.validate().unwrap_err().user_message(), "Password is required");
    }

    #[test]
    fn test_register_requires_username() {
        let req = RegisterRequest {
            email: "a@b.io".into(),
            username: "  ".into(),
            password: "secret".into(),
        };
        assert_eq!(req.validate().unwrap_err().user_message(), "Username is required");
    }
}
