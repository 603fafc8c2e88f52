//! Port interface for webhook status checks
//!
//! The poller only needs a yes/no answer per tick; the HTTP call behind it
//! lives in the infrastructure layer.

use async_trait::async_trait;
use modbay_domain::Result;

/// Trait for querying whether a module's webhook has been verified
#[async_trait]
pub trait WebhookStatusSource: Send + Sync {
    /// Check the verification flag for the given module slug
    async fn verified(&self, slug: &str) -> Result<bool>;
}
