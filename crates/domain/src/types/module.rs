//! Marketplace module types
//!
//! A "module" is a plugin-like package registered from a GitHub repository
//! and downloadable by end users.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author summary embedded in module payloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleAuthor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// A registered marketplace module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    /// Unique human-readable identifier, used in path segments
    pub slug: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub downloads: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<ModuleAuthor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Module {
    /// Title shown to users (display name when set, plain name otherwise)
    #[must_use]
    pub fn title(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    /// Author username, or `None` for anonymous modules
    #[must_use]
    pub fn author_name(&self) -> Option<&str> {
        self.author.as_ref().and_then(|a| a.username.as_deref())
    }

    /// Whether the given user id owns this module
    #[must_use]
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.author.as_ref().and_then(|a| a.id.as_deref()) == Some(user_id)
    }
}

/// Listing filter accepted by the `GET /modules` endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleFilter {
    #[default]
    All,
    Popular,
}

impl ModuleFilter {
    /// Wire value of the `filter` query parameter
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Popular => "popular",
        }
    }
}

impl fmt::Display for ModuleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One page of a module listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModulePage {
    #[serde(default)]
    pub modules: Vec<Module>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(rename = "totalPages", default = "default_page")]
    pub total_pages: u32,
}

impl ModulePage {
    /// Whether a previous page exists
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Whether a next page exists
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

fn default_page() -> u32 {
    1
}
