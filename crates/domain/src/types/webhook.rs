//! Webhook setup payload
//!
//! Registration responses may include the GitHub webhook parameters the user
//! has to configure by hand. The values are surfaced to the caller exactly as
//! the server sent them.

use serde::{Deserialize, Serialize};

/// Webhook parameters returned by `POST /modules`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookSetup {
    /// Payload URL to enter in the GitHub repository settings
    pub url: String,
    /// Shared secret GitHub signs deliveries with
    pub secret: String,
    /// Content type GitHub should send (`json`)
    pub content_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_unchanged() {
        let raw = r#"{"url":"https://api.modbay.io/hooks/abc","secret":"s3cr3t","content_type":"json"}"#;
        let setup: WebhookSetup = serde_json::from_str(raw).unwrap();
        assert_eq!(setup.url, "https://api.modbay.io/hooks/abc");
        assert_eq!(setup.secret, "s3cr3t");
        assert_eq!(setup.content_type, "json");

        let value: serde_json::Value = serde_json::from_str(raw).unwrap();
        assert_eq!(serde_json::to_value(&setup).unwrap(), value);
    }
}
