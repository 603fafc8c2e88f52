//! Session service with typed observers
//!
//! Owns the session lifecycle:
//! - Load on startup from a `SessionStore`
//! - Set on login/register/refresh success
//! - Cleared on logout, refresh failure, or account deletion
//! - Observers notified through typed callbacks, not an ambient event bus

pub mod ports;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use modbay_domain::{Result, Session, User};
use tokio::sync::RwLock;
use tracing::{debug, info};

use self::ports::SessionStore;

/// Change notifications delivered to session observers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A session was established with the given user
    LoggedIn(User),
    /// The session was cleared
    LoggedOut,
}

/// Identifier returned by [`SessionService::subscribe`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Arc<dyn Fn(&SessionEvent) + Send + Sync>;

/// Holds the current session and notifies observers on changes
///
/// All mutation goes through this service; there is no global session state.
pub struct SessionService {
    store: Arc<dyn SessionStore>,
    current: RwLock<Session>,
    observers: parking_lot::RwLock<Vec<(SubscriptionId, Observer)>>,
    next_subscription: AtomicU64,
}

impl SessionService {
    /// Create a service backed by the given store, starting logged out
    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            current: RwLock::new(Session::default()),
            observers: parking_lot::RwLock::new(Vec::new()),
            next_subscription: AtomicU64::new(0),
        }
    }

    /// Load any persisted session into memory
    ///
    /// Should be called on startup, before the first request. Returns `true`
    /// when a session was restored.
    ///
    /// # Errors
    /// Returns error if the store cannot be read
    pub async fn initialize(&self) -> Result<bool> {
        match self.store.load().await? {
            Some(session) => {
                let restored = session.is_logged_in();
                *self.current.write().await = session;
                info!(restored, "session store loaded");
                Ok(restored)
            }
            None => {
                debug!("no persisted session found");
                Ok(false)
            }
        }
    }

    /// Current access token, if one is held
    pub async fn access_token(&self) -> Option<String> {
        self.current.read().await.access_token.clone()
    }

    /// Current user, if logged in
    pub async fn user(&self) -> Option<User> {
        self.current.read().await.user.clone()
    }

    /// Whether both a token and a user are present
    pub async fn is_logged_in(&self) -> bool {
        self.current.read().await.is_logged_in()
    }

    /// Snapshot of the full session state
    pub async fn snapshot(&self) -> Session {
        self.current.read().await.clone()
    }

    /// Establish a session after a successful login or registration
    ///
    /// Persists the session and notifies observers with
    /// [`SessionEvent::LoggedIn`].
    ///
    /// # Errors
    /// Returns error if the store cannot be written (the in-memory session is
    /// still established)
    pub async fn establish(&self, access_token: String, user: User) -> Result<()> {
        let session = Session::authenticated(access_token, user.clone());
        *self.current.write().await = session.clone();
        self.notify(&SessionEvent::LoggedIn(user));
        self.store.save(&session).await
    }

    /// Replace the access token after a successful refresh
    ///
    /// The user is unchanged and no event is emitted.
    ///
    /// # Errors
    /// Returns error if the store cannot be written
    pub async fn replace_token(&self, access_token: String) -> Result<()> {
        let session = {
            let mut current = self.current.write().await;
            current.access_token = Some(access_token);
            current.clone()
        };
        debug!("access token replaced");
        self.store.save(&session).await
    }

    /// Replace the user after a profile update or `/auth/me` validation
    ///
    /// # Errors
    /// Returns error if the store cannot be written
    pub async fn replace_user(&self, user: User) -> Result<()> {
        let session = {
            let mut current = self.current.write().await;
            current.user = Some(user);
            current.clone()
        };
        self.store.save(&session).await
    }

    /// Clear the session (logout, refresh failure, account deletion)
    ///
    /// Observers receive [`SessionEvent::LoggedOut`] exactly once per
    /// transition out of an active session; clearing an already-empty
    /// session emits nothing.
    ///
    /// # Errors
    /// Returns error if the store cannot be cleared (the in-memory session is
    /// cleared regardless)
    pub async fn clear(&self) -> Result<()> {
        let was_active = {
            let mut current = self.current.write().await;
            let was_active = current.access_token.is_some() || current.user.is_some();
            *current = Session::default();
            was_active
        };
        if was_active {
            info!("session cleared");
            self.notify(&SessionEvent::LoggedOut);
        }
        self.store.clear().await
    }

    /// Register an observer for session events
    pub fn subscribe(
        &self,
        observer: impl Fn(&SessionEvent) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.observers.write().push((id, Arc::new(observer)));
        id
    }

    /// Remove a previously registered observer
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.observers.write().retain(|(sub, _)| *sub != id);
    }

    fn notify(&self, event: &SessionEvent) {
        let observers: Vec<Observer> =
            self.observers.read().iter().map(|(_, obs)| Arc::clone(obs)).collect();
        for observer in observers {
            observer(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use async_trait::async_trait;
    use modbay_domain::ModbayError;

    use super::*;

    /// In-memory store for deterministic tests
    #[derive(Default)]
    struct MemoryStore {
        saved: parking_lot::Mutex<Option<Session>>,
        fail_writes: bool,
    }

    #[async_trait]
    impl SessionStore for MemoryStore {
        async fn load(&self) -> Result<Option<Session>> {
            Ok(self.saved.lock().clone())
        }

        async fn save(&self, session: &Session) -> Result<()> {
            if self.fail_writes {
                return Err(ModbayError::Storage("write failed".to_string()));
            }
            *self.saved.lock() = Some(session.clone());
            Ok(())
        }

        async fn clear(&self) -> Result<()> {
            *self.saved.lock() = None;
            Ok(())
        }
    }

    fn user() -> User {
        User {
            id: "u1".to_string(),
            username: "sakura".to_string(),
            email: "sakura@example.com".to_string(),
            created_at: None,
        }
    }

    #[tokio::test]
    async fn starts_logged_out() {
        let service = SessionService::new(Arc::new(MemoryStore::default()));
        assert!(!service.is_logged_in().await);
        assert!(service.access_token().await.is_none());
    }

    #[tokio::test]
    async fn establish_persists_and_notifies() {
        let store = Arc::new(MemoryStore::default());
        let service = SessionService::new(store.clone());

        let logins = Arc::new(AtomicUsize::new(0));
        let seen = logins.clone();
        service.subscribe(move |event| {
            if matches!(event, SessionEvent::LoggedIn(_)) {
                seen.fetch_add(1, Ordering::SeqCst);
            }
        });

        service.establish("tok-1".to_string(), user()).await.unwrap();

        assert!(service.is_logged_in().await);
        assert_eq!(service.access_token().await.as_deref(), Some("tok-1"));
        assert_eq!(logins.load(Ordering::SeqCst), 1);
        assert!(store.saved.lock().as_ref().is_some_and(Session::is_logged_in));
    }

    #[tokio::test]
    async fn initialize_restores_persisted_session() {
        let store = Arc::new(MemoryStore::default());
        *store.saved.lock() = Some(Session::authenticated("tok-1".to_string(), user()));

        let service = SessionService::new(store);
        assert!(service.initialize().await.unwrap());
        assert_eq!(service.access_token().await.as_deref(), Some("tok-1"));
    }

    #[tokio::test]
    async fn clear_emits_logged_out_exactly_once() {
        let service = SessionService::new(Arc::new(MemoryStore::default()));
        service.establish("tok-1".to_string(), user()).await.unwrap();

        let logouts = Arc::new(AtomicUsize::new(0));
        let seen = logouts.clone();
        service.subscribe(move |event| {
            if matches!(event, SessionEvent::LoggedOut) {
                seen.fetch_add(1, Ordering::SeqCst);
            }
        });

        service.clear().await.unwrap();
        service.clear().await.unwrap();

        assert_eq!(logouts.load(Ordering::SeqCst), 1);
        assert!(!service.is_logged_in().await);
    }

    #[tokio::test]
    async fn replace_token_keeps_user_and_stays_quiet() {
        let service = SessionService::new(Arc::new(MemoryStore::default()));
        service.establish("tok-1".to_string(), user()).await.unwrap();

        let events = Arc::new(AtomicUsize::new(0));
        let seen = events.clone();
        service.subscribe(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        service.replace_token("tok-2".to_string()).await.unwrap();

        assert_eq!(service.access_token().await.as_deref(), Some("tok-2"));
        assert_eq!(service.user().await.map(|u| u.username), Some("sakura".to_string()));
        assert_eq!(events.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unsubscribe_stops_notifications() {
        let service = SessionService::new(Arc::new(MemoryStore::default()));

        let events = Arc::new(AtomicUsize::new(0));
        let seen = events.clone();
        let id = service.subscribe(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        service.unsubscribe(id);

        service.establish("tok-1".to_string(), user()).await.unwrap();
        assert_eq!(events.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failed_save_still_establishes_in_memory() {
        let store = Arc::new(MemoryStore { fail_writes: true, ..MemoryStore::default() });
        let service = SessionService::new(store);

        let result = service.establish("tok-1".to_string(), user()).await;
        assert!(result.is_err());
        assert!(service.is_logged_in().await);
    }
}
