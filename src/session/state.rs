//! Session states and allowed transitions

use std::fmt;

use crate::models::User;
use crate::utils::errors::{SenderError, Result};

/// Lifecycle of the auth session:
/// anonymous -> authenticating -> authenticated -> anonymous
#[derive(Clone, PartialEq)]
pub enum SessionState {
    Anonymous,
    Authenticating,
    Authenticated { token: String, user: User },
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Anonymous => "anonymous",
            SessionState::Authenticating => "authenticating",
            SessionState::Authenticated { .. } => "authenticated",
        }
    }

    /// Whether moving from `self` to `next` is a legal transition.
    /// Authenticated -> authenticated is the user refresh.
    pub fn can_transition_to(&self, next: &SessionState) -> bool {
        use SessionState::*;

        matches!(
            (self, next),
            (Anonymous, Authenticating)
                | (Authenticating, Authenticated { .. })
                | (Authenticating, Anonymous)
                | (Authenticated { .. }, Authenticated { .. })
                | (Authenticated { .. }, Anonymous)
                | (Anonymous, Anonymous)
        )
    }

    pub(crate) fn transition(&mut self, next: SessionState) -> Result<()> {
        if !self.can_transition_to(&next) {
            return Err(SenderError::InvalidStateTransition {
                from: self.name().to_string(),
                to: next.name().to_string(),
            });
        }
        *self = next;
        Ok(())
    }
}

impl fmt::Debug for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Authenticated { user, .. } => f
                .debug_struct("Authenticated")
                .field("user", &user.username)
                .finish_non_exhaustive(),
            other => f.write_str(other.name()),
        }
    }
}
