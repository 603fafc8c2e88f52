//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Falls back to built-in defaults when neither source is available
//!
//! ## Environment Variables
//! - `MODBAY_API_BASE_URL`: Base URL of the marketplace API
//! - `MODBAY_API_TIMEOUT_SECS`: HTTP request timeout in seconds
//! - `MODBAY_SESSION_STORE_PATH`: Path of the persisted session file
//! - `MODBAY_VERIFY_INTERVAL_MS`: Webhook verification poll interval
//! - `MODBAY_VERIFY_MAX_ATTEMPTS`: Webhook verification attempt budget
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.toml` or `./config.json` (current working directory)
//! 2. `./modbay.toml` or `./modbay.json` (current working directory)
//! 3. Parent directories (up to 2 levels)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};

use modbay_domain::{
    ApiConfig, Config, ModbayError, Result, SessionConfig, VerificationConfig,
};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables, then from a config
/// file, and finally falls back to built-in defaults.
///
/// # Errors
/// Returns `ModbayError::Config` if a source is present but malformed
/// (e.g., a config file exists yet fails to parse).
pub fn load() -> Result<Config> {
    dotenvy::dotenv().ok();

    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            match probe_config_paths() {
                Some(path) => load_from_file(Some(path)),
                None => {
                    tracing::info!("No configuration source found, using defaults");
                    Ok(Config::default())
                }
            }
        }
    }
}

/// Load configuration from environment variables
///
/// All required environment variables must be present. Returns an error
/// if any are missing.
///
/// # Errors
/// Returns `ModbayError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<Config> {
    let base_url = env_var("MODBAY_API_BASE_URL")?;
    let timeout_seconds = env_var("MODBAY_API_TIMEOUT_SECS").and_then(|s| {
        s.parse::<u64>().map_err(|e| ModbayError::Config(format!("Invalid timeout: {}", e)))
    })?;

    let store_path = env_var("MODBAY_SESSION_STORE_PATH")?;

    let interval_ms = env_var("MODBAY_VERIFY_INTERVAL_MS").and_then(|s| {
        s.parse::<u64>()
            .map_err(|e| ModbayError::Config(format!("Invalid verify interval: {}", e)))
    })?;
    let max_attempts = env_var("MODBAY_VERIFY_MAX_ATTEMPTS").and_then(|s| {
        s.parse::<u32>()
            .map_err(|e| ModbayError::Config(format!("Invalid verify attempts: {}", e)))
    })?;

    Ok(Config {
        api: ApiConfig { base_url: normalize_base_url(base_url), timeout_seconds },
        session: SessionConfig { store_path },
        verification: VerificationConfig { interval_ms, max_attempts },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Arguments
/// * `path` - Optional path to config file. If `None`, uses
///   [`probe_config_paths`].
///
/// # Errors
/// Returns `ModbayError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ModbayError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ModbayError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ModbayError::Config(format!("Failed to read config file: {}", e)))?;

    let mut config = parse_config(&contents, &config_path)?;
    config.api.base_url = normalize_base_url(config.api.base_url);
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ModbayError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| ModbayError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(ModbayError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    // Try current working directory
    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(vec![
            cwd.join("config.toml"),
            cwd.join("config.json"),
            cwd.join("modbay.toml"),
            cwd.join("modbay.json"),
            cwd.join("../config.toml"),
            cwd.join("../config.json"),
            cwd.join("../../config.toml"),
            cwd.join("../../config.json"),
        ]);
    }

    // Try relative to executable
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(vec![
                exe_dir.join("config.toml"),
                exe_dir.join("config.json"),
                exe_dir.join("modbay.toml"),
                exe_dir.join("modbay.json"),
            ]);
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

/// The base URL never carries a trailing slash; request paths start with one.
fn normalize_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| ModbayError::Config(format!("Missing required environment variable: {}", key)))
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::NamedTempFile;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const ENV_KEYS: &[&str] = &[
        "MODBAY_API_BASE_URL",
        "MODBAY_API_TIMEOUT_SECS",
        "MODBAY_SESSION_STORE_PATH",
        "MODBAY_VERIFY_INTERVAL_MS",
        "MODBAY_VERIFY_MAX_ATTEMPTS",
    ];

    fn clear_env() {
        for key in ENV_KEYS {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn test_load_from_env_all_vars_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::set_var("MODBAY_API_BASE_URL", "https://api.test.modbay.io/");
        std::env::set_var("MODBAY_API_TIMEOUT_SECS", "10");
        std::env::set_var("MODBAY_SESSION_STORE_PATH", "/tmp/session.json");
        std::env::set_var("MODBAY_VERIFY_INTERVAL_MS", "500");
        std::env::set_var("MODBAY_VERIFY_MAX_ATTEMPTS", "30");

        let result = load_from_env();
        assert!(result.is_ok(), "Should load config from env vars, error: {:?}", result.err());

        let config = result.unwrap();
        // Trailing slash is stripped so path concatenation stays clean
        assert_eq!(config.api.base_url, "https://api.test.modbay.io");
        assert_eq!(config.api.timeout_seconds, 10);
        assert_eq!(config.session.store_path, "/tmp/session.json");
        assert_eq!(config.verification.interval_ms, 500);
        assert_eq!(config.verification.max_attempts, 30);

        clear_env();
    }

    #[test]
    fn test_load_from_env_missing_var() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        let result = load_from_env();
        assert!(result.is_err(), "Should fail with missing env var");
        assert!(matches!(result.unwrap_err(), ModbayError::Config(_)));
    }

    #[test]
    fn test_load_from_env_invalid_number() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::set_var("MODBAY_API_BASE_URL", "https://api.test.modbay.io");
        std::env::set_var("MODBAY_API_TIMEOUT_SECS", "not-a-number");

        let result = load_from_env();
        assert!(result.is_err(), "Should fail with invalid timeout");
        assert!(matches!(result.unwrap_err(), ModbayError::Config(_)));

        clear_env();
    }

    #[test]
    fn test_load_from_file_toml() {
        let toml_content = r#"
[api]
base_url = "https://api.test.modbay.io"
timeout_seconds = 15

[session]
store_path = "session.json"

[verification]
interval_ms = 2000
max_attempts = 60
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        let path = temp_file.path().with_extension("toml");
        std::fs::copy(temp_file.path(), &path).unwrap();

        let result = load_from_file(Some(path.clone()));
        assert!(result.is_ok(), "Should load config from TOML file");

        let config = result.unwrap();
        assert_eq!(config.api.base_url, "https://api.test.modbay.io");
        assert_eq!(config.api.timeout_seconds, 15);
        assert_eq!(config.verification.max_attempts, 60);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_json() {
        let json_content = r#"{
            "api": { "base_url": "https://api.test.modbay.io", "timeout_seconds": 5 },
            "session": { "store_path": "session.json" },
            "verification": { "interval_ms": 1000, "max_attempts": 10 }
        }"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(json_content.as_bytes()).unwrap();
        let path = temp_file.path().with_extension("json");
        std::fs::copy(temp_file.path(), &path).unwrap();

        let result = load_from_file(Some(path.clone()));
        assert!(result.is_ok(), "Should load config from JSON file");

        let config = result.unwrap();
        assert_eq!(config.api.timeout_seconds, 5);
        assert_eq!(config.verification.interval_ms, 1000);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/config.json")));
        assert!(result.is_err(), "Should fail when file not found");
        assert!(matches!(result.unwrap_err(), ModbayError::Config(_)));
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let path = PathBuf::from("test.yaml");
        let result = parse_config("some content", &path);
        assert!(result.is_err(), "Should fail with unsupported format");
    }
}
