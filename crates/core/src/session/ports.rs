//! Port interfaces for session persistence
//!
//! These traits define the boundary between the session service and
//! whatever storage backs it (a JSON file in production, memory in tests).

use async_trait::async_trait;
use modbay_domain::{Result, Session};

/// Trait for persisting the session between runs
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the persisted session, if any
    async fn load(&self) -> Result<Option<Session>>;

    /// Persist the given session, replacing any previous one
    async fn save(&self, session: &Session) -> Result<()>;

    /// Remove the persisted session
    async fn clear(&self) -> Result<()>;
}
