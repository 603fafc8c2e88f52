//! API-specific error types
//!
//! The taxonomy the UI layer consumes: a response with a non-success status
//! carries the status, a message, and the raw body; no response at all is a
//! connection error (status 0).

use modbay_domain::ModbayError;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// API operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Server replied with a non-2xx status (after any retry)
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        /// Server-provided `message` field, or a generic fallback
        message: String,
        /// Raw response body (`{}` when empty or not JSON)
        body: Value,
    },

    /// No response was received
    #[error("Connection error: {0}")]
    Connection(String),

    /// Client was constructed or used with invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Build the error for a non-success response from its status and body
    #[must_use]
    pub fn from_response(status: StatusCode, body: Value) -> Self {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .map_or_else(|| format!("Request failed with status {}", status.as_u16()), String::from);
        Self::Api { status: status.as_u16(), message, body }
    }

    /// HTTP status code, `0` for connection-level failures
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            Self::Api { status, .. } => *status,
            Self::Connection(_) | Self::Config(_) => 0,
        }
    }

    /// Whether the server rejected the credentials
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == StatusCode::UNAUTHORIZED.as_u16()
    }
}

impl From<ModbayError> for ApiError {
    fn from(err: ModbayError) -> Self {
        match err {
            ModbayError::Config(msg) => Self::Config(msg),
            other => Self::Connection(other.to_string()),
        }
    }
}

/// Convert to the domain error for the presentation boundary
impl From<ApiError> for ModbayError {
    fn from(err: ApiError) -> Self {
        match &err {
            ApiError::Api { status, message, .. } => match *status {
                401 | 403 => Self::Auth(message.clone()),
                404 => Self::NotFound(message.clone()),
                400 | 409 | 422 => Self::InvalidInput(message.clone()),
                _ => Self::Network(err.to_string()),
            },
            ApiError::Connection(msg) => Self::Network(msg.clone()),
            ApiError::Config(msg) => Self::Config(msg.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn message_comes_from_body_when_present() {
        let err =
            ApiError::from_response(StatusCode::BAD_REQUEST, json!({"message": "bad slug"}));
        assert_eq!(err.status(), 400);
        assert_eq!(err.to_string(), "API error (400): bad slug");
    }

    #[test]
    fn message_falls_back_when_body_is_empty() {
        let err = ApiError::from_response(StatusCode::INTERNAL_SERVER_ERROR, json!({}));
        assert_eq!(err.to_string(), "API error (500): Request failed with status 500");
    }

    #[test]
    fn connection_errors_report_status_zero() {
        let err = ApiError::Connection("connection refused".to_string());
        assert_eq!(err.status(), 0);
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn unauthorized_is_detected() {
        let err = ApiError::from_response(StatusCode::UNAUTHORIZED, json!({}));
        assert!(err.is_unauthorized());
    }

    #[test]
    fn domain_mapping_follows_status() {
        let not_found = ApiError::from_response(StatusCode::NOT_FOUND, json!({}));
        assert!(matches!(ModbayError::from(not_found), ModbayError::NotFound(_)));

        let auth = ApiError::from_response(StatusCode::UNAUTHORIZED, json!({}));
        assert!(matches!(ModbayError::from(auth), ModbayError::Auth(_)));

        let conn = ApiError::Connection("down".to_string());
        assert!(matches!(ModbayError::from(conn), ModbayError::Network(_)));
    }
}
