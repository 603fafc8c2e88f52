//! Session state
//!
//! The browser-storage analogue: the short-lived access token plus the
//! profile it belongs to, persisted between runs through a `SessionStore`
//! implementation.

use serde::{Deserialize, Serialize};

use super::user::User;

/// Persisted authentication state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer credential attached to authenticated requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl Session {
    /// Session holding a freshly issued token and its user
    #[must_use]
    pub fn authenticated(access_token: String, user: User) -> Self {
        Self { access_token: Some(access_token), user: Some(user) }
    }

    /// Logged in means both a token and a user are present
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.access_token.is_some() && self.user.is_some()
    }
}
