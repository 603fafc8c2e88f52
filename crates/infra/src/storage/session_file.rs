//! File-backed session store
//!
//! The browser-storage analogue: the session is a small JSON document on
//! disk. A corrupt file is treated as an absent session, the same way a
//! client would discard unparseable stored state.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use modbay_core::SessionStore;
use modbay_domain::{ModbayError, Result, Session};
use tracing::{debug, warn};

/// Persists the session as a JSON file at a fixed path
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Create a store writing to the given path
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path the session is persisted at
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<Session>> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(ModbayError::Storage(format!(
                    "failed to read session file {}: {err}",
                    self.path.display()
                )))
            }
        };

        match serde_json::from_slice::<Session>(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "discarding corrupt session file");
                Ok(None)
            }
        }
    }

    async fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|err| {
                    ModbayError::Storage(format!(
                        "failed to create session directory {}: {err}",
                        parent.display()
                    ))
                })?;
            }
        }

        let raw = serde_json::to_vec_pretty(session)
            .map_err(|err| ModbayError::Internal(format!("failed to encode session: {err}")))?;

        tokio::fs::write(&self.path, raw).await.map_err(|err| {
            ModbayError::Storage(format!(
                "failed to write session file {}: {err}",
                self.path.display()
            ))
        })?;
        debug!(path = %self.path.display(), "session persisted");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(ModbayError::Storage(format!(
                "failed to remove session file {}: {err}",
                self.path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use modbay_domain::User;
    use tempfile::TempDir;

    use super::*;

    fn session() -> Session {
        Session::authenticated(
            "tok-1".to_string(),
            User {
                id: "u1".to_string(),
                username: "sakura".to_string(),
                email: "sakura@example.com".to_string(),
                created_at: None,
            },
        )
    }

    #[tokio::test]
    async fn load_returns_none_when_file_is_absent() {
        let dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested/session.json"));

        store.save(&session()).await.unwrap();
        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded, session());
    }

    #[tokio::test]
    async fn corrupt_file_is_treated_as_absent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        tokio::fs::write(&path, b"not json").await.unwrap();

        let store = FileSessionStore::new(&path);
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn clear_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));

        store.save(&session()).await.unwrap();
        store.clear().await.unwrap();
        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
    }
}
