//! Test data builders
//!
//! JSON payloads shaped like the backend's responses, plus typed fixtures
//! for the pure evaluator tests.

use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;

use sender_client::models::{Contact, MessengerAccount, MessengerType, Role, Template, User};

pub const TEST_EMAIL: &str = "owner@example.com";
pub const TEST_PASSWORD: &str = "testpassword123";
pub const BACKEND_TIMESTAMP: &str = "2024-05-01T10:20:30.123456";

pub fn test_user_id() -> Uuid {
    Uuid::parse_str("6f1c2a4e-8a52-4a5b-9d0c-6f0e3e2b9d11").unwrap()
}

pub fn user_json(role: &str, plan: &str, sent: u64, is_unlimited: bool) -> Value {
    json!({
        "id": test_user_id(),
        "email": TEST_EMAIL,
        "username": "owner",
        "role": role,
        "subscription_plan": plan,
        "is_unlimited": is_unlimited,
        "messages_sent_this_month": sent,
        "created_at": BACKEND_TIMESTAMP
    })
}

pub fn account_json(id: Uuid, messenger_type: &str, name: &str, is_active: bool) -> Value {
    json!({
        "id": id,
        "user_id": test_user_id(),
        "messenger_type": messenger_type,
        "account_name": name,
        "session_data": {},
        "is_active": is_active,
        "created_at": BACKEND_TIMESTAMP
    })
}

pub fn contact_json(name: &str, phone: Option<&str>, telegram_username: Option<&str>) -> Value {
    json!({
        "id": Uuid::new_v4(),
        "user_id": test_user_id(),
        "name": name,
        "phone": phone,
        "telegram_username": telegram_username,
        "created_at": BACKEND_TIMESTAMP
    })
}

pub fn template_json(id: Uuid, name: &str, content: &str) -> Value {
    json!({
        "id": id,
        "user_id": test_user_id(),
        "name": name,
        "content": content,
        "created_at": BACKEND_TIMESTAMP
    })
}

pub fn plans_json() -> Value {
    json!({
        "free": {"name": "Бесплатный", "message_limit": 10, "price": 0},
        "basic": {"name": "Базовый", "message_limit": 1000, "price": 999},
        "professional": {"name": "Профессиональный", "message_limit": 5000, "price": 2999},
        "corporate": {"name": "Корпоративный", "message_limit": 20000, "price": 9999},
        "unlimited": {"name": "Безлимитный", "message_limit": -1, "price": 0}
    })
}

#[derive(Serialize)]
struct Claims {
    sub: String,
    exp: i64,
}

/// A backend-style JWT expiring `seconds` from now (negative for the past)
pub fn jwt_expiring_in(seconds: i64) -> String {
    encode(
        &Header::default(),
        &Claims {
            sub: test_user_id().to_string(),
            exp: Utc::now().timestamp() + seconds,
        },
        &EncodingKey::from_secret(b"your-super-secret-jwt-key-change-in-production"),
    )
    .unwrap()
}

// Typed fixtures

pub fn user(plan: &str, sent: u64, is_unlimited: bool) -> User {
    User {
        id: test_user_id(),
        email: TEST_EMAIL.to_string(),
        username: "owner".to_string(),
        role: Role::User,
        subscription_plan: plan.to_string(),
        is_unlimited,
        messages_sent_this_month: sent,
        created_at: Utc::now().naive_utc(),
    }
}

pub fn account(messenger_type: MessengerType) -> MessengerAccount {
    MessengerAccount {
        id: Uuid::new_v4(),
        user_id: test_user_id(),
        messenger_type,
        account_name: format!("{} account", messenger_type),
        is_active: true,
        created_at: Utc::now().naive_utc(),
    }
}

pub fn contact(name: &str, phone: Option<&str>, telegram_username: Option<&str>) -> Contact {
    Contact {
        id: Uuid::new_v4(),
        user_id: test_user_id(),
        name: name.to_string(),
        phone: phone.map(String::from),
        telegram_username: telegram_username.map(String::from),
        created_at: Utc::now().naive_utc(),
    }
}

/// `count` contacts that all have a phone and a Telegram username
pub fn reachable_contacts(count: usize) -> Vec<Contact> {
    (0..count)
        .map(|i| {
            contact(
                &format!("Contact {}", i),
                Some(&format!("+7999{:07}", i)),
                Some(&format!("contact_{}", i)),
            )
        })
        .collect()
}

pub fn template(name: &str) -> Template {
    Template {
        id: Uuid::new_v4(),
        user_id: test_user_id(),
        name: name.to_string(),
        content: format!("Hello from {}", name),
        created_at: Utc::now().naive_utc(),
    }
}
