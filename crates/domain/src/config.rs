//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_HTTP_TIMEOUT_SECS, VERIFICATION_INTERVAL_MS,
    VERIFICATION_MAX_ATTEMPTS,
};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub verification: VerificationConfig,
}

/// Remote API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL the request paths are appended to (no trailing slash)
    pub base_url: String,
    pub timeout_seconds: u64,
}

/// Session persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Path of the JSON file the session is persisted to
    pub store_path: String,
}

/// Webhook verification polling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationConfig {
    pub interval_ms: u64,
    pub max_attempts: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECS,
            },
            session: SessionConfig {
                store_path: "modbay-session.json".to_string(),
            },
            verification: VerificationConfig {
                interval_ms: VERIFICATION_INTERVAL_MS,
                max_attempts: VERIFICATION_MAX_ATTEMPTS,
            },
        }
    }
}
