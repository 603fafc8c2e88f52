//! Infrastructure error types

use modbay_domain::ModbayError;
use thiserror::Error;

/// Errors raised by infrastructure adapters before they are mapped onto the
/// domain error type
#[derive(Debug, Error)]
pub enum InfraError {
    #[error("HTTP transport error: {0}")]
    Http(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for InfraError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

impl From<toml::de::Error> for InfraError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

impl From<InfraError> for ModbayError {
    fn from(err: InfraError) -> Self {
        match err {
            InfraError::Http(msg) => Self::Network(msg),
            InfraError::Io(io) => Self::Storage(io.to_string()),
            InfraError::Serde(msg) => Self::Internal(msg),
            InfraError::Config(msg) => Self::Config(msg),
        }
    }
}
