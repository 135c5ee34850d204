//! Auth session
//!
//! The session owns the auth token and the cached current user. Services take
//! a `&Session` and obtain an authorized API client from it, so there is no
//! global auth state. Login and logout are explicit state transitions; see
//! [`SessionState`].

pub mod state;
pub mod storage;
pub mod token;

pub use state::SessionState;
pub use storage::{FileTokenStore, MemoryTokenStore, TokenStore, AUTH_TOKEN_KEY};

use tracing::{debug, info, warn};

use crate::api::ApiClient;
use crate::models::{LoginRequest, RegisterRequest, User};
use crate::utils::errors::{SenderError, Result};
use crate::utils::logging::log_user_action;

pub struct Session {
    api: ApiClient,
    store: Box<dyn TokenStore>,
    state: SessionState,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("api", &self.api)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Create an anonymous session. `api` must not carry a token.
    pub fn new(api: ApiClient, store: Box<dyn TokenStore>) -> Self {
        Self {
            api,
            store,
            state: SessionState::Anonymous,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated { .. })
    }

    pub fn token(&self) -> Option<&str> {
        match &self.state {
            SessionState::Authenticated { token, .. } => Some(token),
            _ => None,
        }
    }

    pub fn user(&self) -> Option<&User> {
        match &self.state {
            SessionState::Authenticated { user, .. } => Some(user),
            _ => None,
        }
    }

    /// Current user, or an authentication error when logged out
    pub fn require_user(&self) -> Result<&User> {
        self.user()
            .ok_or_else(|| SenderError::Authentication("You are not logged in".to_string()))
    }

    /// Client for calls that need no login
    pub fn public_api(&self) -> &ApiClient {
        &self.api
    }

    /// Client carrying this session's bearer token
    pub fn api(&self) -> Result<ApiClient> {
        let token = self
            .token()
            .ok_or_else(|| SenderError::Authentication("You are not logged in".to_string()))?;
        Ok(self.api.with_token(token))
    }

    /// Resume the session from the persisted token.
    ///
    /// Returns `Ok(true)` when the stored token was accepted. Expired or
    /// rejected tokens are removed from storage; on a network failure the
    /// token is kept so that a later attempt can succeed.
    pub async fn restore(&mut self) -> Result<bool> {
        let token = match self.store.load()? {
            Some(token) => token,
            None => {
                debug!("No stored token, staying anonymous");
                return Ok(false);
            }
        };

        if token::is_expired(&token) {
            info!("Stored token has expired, discarding it");
            self.store.clear()?;
            return Ok(false);
        }

        self.state.transition(SessionState::Authenticating)?;
        match self.api.with_token(token.clone()).me().await {
            Ok(user) => {
                debug!(username = %user.username, "Session restored");
                self.state.transition(SessionState::Authenticated { token, user })?;
                Ok(true)
            }
            Err(e) if e.is_unauthorized() => {
                warn!("Stored token was rejected, discarding it");
                self.state.transition(SessionState::Anonymous)?;
                self.store.clear()?;
                Ok(false)
            }
            Err(e) => {
                self.state.transition(SessionState::Anonymous)?;
                Err(e)
            }
        }
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<&User> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        request.validate()?;

        self.state.transition(SessionState::Authenticating)?;
        self.authenticate(request).await
    }

    /// Create an account and log into it
    pub async fn register(&mut self, email: &str, username: &str, password: &str) -> Result<&User> {
        let request = RegisterRequest {
            email: email.trim().to_string(),
            username: username.trim().to_string(),
            password: password.to_string(),
        };
        request.validate()?;

        self.state.transition(SessionState::Authenticating)?;
        if let Err(e) = self.api.register(&request).await {
            self.state.transition(SessionState::Anonymous)?;
            return Err(e);
        }
        log_user_action(&request.username, "register", None);

        self.authenticate(LoginRequest {
            email: request.email,
            password: request.password,
        })
        .await
    }

    /// Forget the token. Allowed from any state.
    pub fn logout(&mut self) -> Result<()> {
        if let Some(user) = self.user() {
            log_user_action(&user.username, "logout", None);
        }
        self.state = SessionState::Anonymous;
        self.store.clear()
    }

    /// Re-fetch the current user, e.g. after a broadcast changed the quota.
    /// A rejected token ends the session the same way `restore` does.
    pub async fn refresh_user(&mut self) -> Result<&User> {
        let token = match &self.state {
            SessionState::Authenticated { token, .. } => token.clone(),
            other => {
                return Err(SenderError::InvalidStateTransition {
                    from: other.name().to_string(),
                    to: "authenticated".to_string(),
                })
            }
        };

        let user = match self.api.with_token(token.clone()).me().await {
            Ok(user) => user,
            Err(e) if e.is_unauthorized() => {
                warn!("Token was rejected on refresh, discarding it");
                self.state.transition(SessionState::Anonymous)?;
                self.store.clear()?;
                return Err(e);
            }
            Err(e) => return Err(e),
        };
        self.state.transition(SessionState::Authenticated { token, user })?;
        self.require_user()
    }

    async fn authenticate(&mut self, request: LoginRequest) -> Result<&User> {
        let response = match self.api.login(&request).await {
            Ok(response) => response,
            Err(e) => {
                self.state.transition(SessionState::Anonymous)?;
                return Err(e);
            }
        };

        if let Err(e) = self.store.save(&response.access_token) {
            self.state.transition(SessionState::Anonymous)?;
            return Err(e);
        }

        log_user_action(&response.user.username, "login", None);
        self.state.transition(SessionState::Authenticated {
            token: response.access_token,
            user: response.user,
        })?;
        self.require_user()
    }
}
