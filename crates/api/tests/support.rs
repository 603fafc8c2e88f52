use modbay_app::AppContext;
use modbay_domain::{ApiConfig, Config, SessionConfig, VerificationConfig};
use tempfile::TempDir;

/// Application context wired against a mock server, with its session file in
/// a temporary directory.
pub struct TestApp {
    pub ctx: AppContext,
    /// Keep temporary directory alive for the lifetime of the context.
    pub temp_dir: TempDir,
}

/// Build a context with a fast poll cadence suitable for tests.
pub fn setup_app(base_url: &str, interval_ms: u64, max_attempts: u32) -> TestApp {
    let temp_dir = TempDir::new().expect("failed to create temporary session directory");
    let config = Config {
        api: ApiConfig { base_url: base_url.to_string(), timeout_seconds: 5 },
        session: SessionConfig {
            store_path: temp_dir
                .path()
                .join("session.json")
                .to_string_lossy()
                .into_owned(),
        },
        verification: VerificationConfig { interval_ms, max_attempts },
    };

    let ctx = AppContext::with_config(config).expect("failed to build app context");
    TestApp { ctx, temp_dir }
}

/// Build a context over an existing session file, simulating a relaunch.
pub fn setup_app_with_store(base_url: &str, store_path: std::path::PathBuf) -> AppContext {
    let config = Config {
        api: ApiConfig { base_url: base_url.to_string(), timeout_seconds: 5 },
        session: SessionConfig { store_path: store_path.to_string_lossy().into_owned() },
        verification: VerificationConfig { interval_ms: 2000, max_attempts: 60 },
    };
    AppContext::with_config(config).expect("failed to build app context")
}
