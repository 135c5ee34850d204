//! Mock Sender backend for testing
//!
//! This module provides a mock HTTP server that simulates the Sender REST API
//! for testing purposes. It uses wiremock to create configurable mock responses.

use serde_json::{json, Value};
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

use sender_client::config::ApiConfig;
use sender_client::session::MemoryTokenStore;
use sender_client::{ApiClient, Session};

/// Mock Sender API server for testing
pub struct SenderMockServer {
    pub server: MockServer,
}

impl SenderMockServer {
    /// Create a new mock backend
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.server.uri(),
            ..ApiConfig::default()
        }
    }

    /// Anonymous client pointed at the mock
    pub fn api(&self) -> ApiClient {
        ApiClient::new(&self.api_config()).expect("mock client")
    }

    /// Anonymous session with an in-memory token store
    pub fn session(&self) -> Session {
        Session::new(self.api(), Box::new(MemoryTokenStore::new()))
    }

    /// Session whose store already holds `token`
    pub fn session_with_stored_token(&self, token: &str) -> Session {
        Session::new(self.api(), Box::new(MemoryTokenStore::with_token(token)))
    }

    /// Successful login returning `token` and `user`
    pub async fn mock_login(&self, token: &str, user: Value) {
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": token,
                "token_type": "bearer",
                "user": user
            })))
            .mount(&self.server)
            .await;
    }

    /// Any endpoint failing with a FastAPI-style `detail`
    pub async fn mock_rejection(&self, http_method: &str, endpoint: &str, status: u16, detail: &str) {
        Mock::given(method(http_method))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({ "detail": detail })))
            .mount(&self.server)
            .await;
    }

    /// Authenticated GET answering `body` only for `Bearer {token}`
    pub async fn mock_get(&self, endpoint: &str, token: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .and(header("Authorization", format!("Bearer {}", token).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// `GET /api/auth/me` for `token`
    pub async fn mock_me(&self, token: &str, user: Value) {
        self.mock_get("/api/auth/me", token, user).await;
    }

    /// Public plan list
    pub async fn mock_plans(&self, plans: Value) {
        Mock::given(method("GET"))
            .and(path("/api/subscription-plans"))
            .respond_with(ResponseTemplate::new(200).set_body_json(plans))
            .mount(&self.server)
            .await;
    }

    /// Log `session` in as `user` with `token`
    pub async fn login(&self, session: &mut Session, token: &str, user: Value) {
        self.mock_login(token, user).await;
        session
            .login(super::TEST_EMAIL, super::TEST_PASSWORD)
            .await
            .expect("login against mock");
    }

    /// Number of requests the mock has seen
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or(0)
    }
}
