//! User account types
//!
//! User profile as returned by the marketplace API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account of a registered developer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Single uppercase character used for the avatar placeholder
    #[must_use]
    pub fn avatar_initial(&self) -> Option<char> {
        self.username.chars().next().map(|c| c.to_ascii_uppercase())
    }
}
