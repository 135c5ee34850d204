//! Sender REST API client
//!
//! One typed method per backend endpoint. Authenticated calls carry the
//! session's bearer token; a client without a token refuses them before any
//! request is made. Failures are never retried.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;
use uuid::Uuid;

use crate::config::ApiConfig;
use crate::models::{
    BroadcastLog, Contact, CreateAccountRequest, CreateContactRequest, CreateTemplateRequest,
    LoginRequest, LoginResponse, MessengerAccount, RegisterRequest, SubscriptionPlans, Template,
    User,
};
use crate::utils::errors::{SenderError, Result};
use crate::utils::logging::log_api_error;

/// Acknowledgement returned by the admin update endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}

/// Error payload of a rejected request
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.token.is_some())
            .finish()
    }
}

impl ApiClient {
    /// Create an anonymous client for the configured backend
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder.build().map_err(SenderError::Network)?;

        let mut base_url = Url::parse(&config.base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client,
            base_url,
            token: None,
        })
    }

    /// Copy of this client that authenticates with `token`
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: Some(token.into()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // Authentication

    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        let builder = self.request(Method::POST, "auth/login")?.json(request);
        self.send(builder, "auth/login").await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<User> {
        let builder = self.request(Method::POST, "auth/register")?.json(request);
        self.send(builder, "auth/register").await
    }

    pub async fn me(&self) -> Result<User> {
        let builder = self.authorized(Method::GET, "auth/me")?;
        self.send(builder, "auth/me").await
    }

    // Templates

    pub async fn list_templates(&self) -> Result<Vec<Template>> {
        let builder = self.authorized(Method::GET, "templates")?;
        self.send(builder, "templates").await
    }

    pub async fn create_template(&self, request: &CreateTemplateRequest) -> Result<Template> {
        let builder = self.authorized(Method::POST, "templates")?.json(request);
        self.send(builder, "templates").await
    }

    // Contacts

    pub async fn list_contacts(&self) -> Result<Vec<Contact>> {
        let builder = self.authorized(Method::GET, "contacts")?;
        self.send(builder, "contacts").await
    }

    /// The backend reads new contacts from the query string
    pub async fn create_contact(&self, request: &CreateContactRequest) -> Result<Contact> {
        let builder = self.authorized(Method::POST, "contacts")?.query(request);
        self.send(builder, "contacts").await
    }

    // Messenger accounts

    pub async fn list_accounts(&self) -> Result<Vec<MessengerAccount>> {
        let builder = self.authorized(Method::GET, "messenger-accounts")?;
        self.send(builder, "messenger-accounts").await
    }

    pub async fn create_account(&self, request: &CreateAccountRequest) -> Result<MessengerAccount> {
        let builder = self.authorized(Method::POST, "messenger-accounts")?.json(request);
        self.send(builder, "messenger-accounts").await
    }

    // Broadcast history

    pub async fn list_broadcast_logs(&self) -> Result<Vec<BroadcastLog>> {
        let builder = self.authorized(Method::GET, "broadcast-logs")?;
        self.send(builder, "broadcast-logs").await
    }

    // Administration

    pub async fn list_users(&self) -> Result<Vec<User>> {
        let builder = self.authorized(Method::GET, "users")?;
        self.send(builder, "users").await
    }

    pub async fn set_unlimited(&self, user_id: Uuid, is_unlimited: bool) -> Result<ApiMessage> {
        let path = format!("users/{}/unlimited", user_id);
        let builder = self
            .authorized(Method::PUT, &path)?
            .query(&[("is_unlimited", is_unlimited)]);
        self.send(builder, &path).await
    }

    pub async fn set_subscription(&self, user_id: Uuid, plan: &str) -> Result<ApiMessage> {
        let path = format!("users/{}/subscription", user_id);
        let builder = self.authorized(Method::PUT, &path)?.query(&[("plan", plan)]);
        self.send(builder, &path).await
    }

    pub async fn subscription_plans(&self) -> Result<SubscriptionPlans> {
        let builder = self.request(Method::GET, "subscription-plans")?;
        self.send(builder, "subscription-plans").await
    }

    pub async fn update_plan_price(&self, plan_id: &str, price: i64) -> Result<ApiMessage> {
        let path = format!("subscription-plans/{}", plan_id);
        let builder = self.authorized(Method::PUT, &path)?.query(&[("price", price)]);
        self.send(builder, &path).await
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join("api/")?.join(path)?)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.endpoint(path)?;
        let builder = self.client.request(method, url);
        Ok(match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    fn authorized(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        if self.token.is_none() {
            return Err(SenderError::Authentication("You are not logged in".to_string()));
        }
        self.request(method, path)
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder, endpoint: &str) -> Result<T> {
        debug!(endpoint = endpoint, "Sending API request");

        let response = builder.send().await.map_err(|e| {
            log_api_error(endpoint, &e.to_string(), Some("request failed"));
            SenderError::Network(e)
        })?;

        if !response.status().is_success() {
            let err = rejection(response).await;
            log_api_error(endpoint, &err.to_string(), None);
            return Err(err);
        }

        Ok(response.json::<T>().await?)
    }
}

/// Turn a non-2xx response into a backend error carrying its `detail`
async fn rejection(response: Response) -> SenderError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    let detail = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.detail)
        .map(|detail| match detail {
            serde_json::Value::String(text) => text,
            other => other.to_string(),
        })
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });

    SenderError::Backend { status, detail }
}
