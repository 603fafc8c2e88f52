use std::sync::Arc;
use std::time::Duration;

use modbay_core::SessionService;
use modbay_domain::User;
use modbay_infra::{ApiClient, ApiClientConfig, FileSessionStore};
use tempfile::TempDir;

/// Shared context for integration tests that drive the API client against a
/// mock server.
pub struct TestContext {
    pub session: Arc<SessionService>,
    pub client: Arc<ApiClient>,
    /// Keep temporary directory alive for the lifetime of the context.
    _temp_dir: TempDir,
}

/// Create a new test context with a file-backed session store.
pub fn setup_test_context(base_url: &str) -> TestContext {
    let temp_dir = TempDir::new().expect("failed to create temporary session directory");
    let store = Arc::new(FileSessionStore::new(temp_dir.path().join("session.json")));
    let session = Arc::new(SessionService::new(store));

    let config =
        ApiClientConfig { base_url: base_url.to_string(), timeout: Duration::from_secs(5) };
    let client =
        Arc::new(ApiClient::new(config, Arc::clone(&session)).expect("failed to build client"));

    TestContext { session, client, _temp_dir: temp_dir }
}

/// Fixture user matching the payloads the mock server returns.
pub fn test_user() -> User {
    User {
        id: "u1".to_string(),
        username: "sakura".to_string(),
        email: "sakura@example.com".to_string(),
        created_at: None,
    }
}
