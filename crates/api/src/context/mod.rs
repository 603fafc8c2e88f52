//! Application context - dependency injection container

use std::sync::Arc;
use std::time::Duration;

use modbay_core::{SessionService, WebhookVerifier};
use modbay_domain::{Config, ModbayError, Result};
use modbay_infra::api::{
    ApiClient, ApiClientConfig, ApiWebhookStatusSource, AuthApi, ModulesApi, StatsApi,
};
use modbay_infra::storage::FileSessionStore;

/// Application context - holds all services and dependencies
///
/// One instance per running client; everything a command needs hangs off it.
pub struct AppContext {
    pub config: Config,
    pub session: Arc<SessionService>,
    pub auth: AuthApi,
    pub modules: Arc<ModulesApi>,
    pub stats: StatsApi,
    pub verifier: WebhookVerifier,
}

impl AppContext {
    /// Build the context from the standard configuration sources
    ///
    /// # Errors
    /// Returns error if configuration is malformed or the HTTP client cannot
    /// be constructed
    pub fn init() -> Result<Self> {
        let config = modbay_infra::config::load()?;
        Self::with_config(config)
    }

    /// Build the context from an explicit configuration
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be constructed
    pub fn with_config(config: Config) -> Result<Self> {
        let store = Arc::new(FileSessionStore::new(&config.session.store_path));
        let session = Arc::new(SessionService::new(store));

        let api_config = ApiClientConfig {
            base_url: config.api.base_url.clone(),
            timeout: Duration::from_secs(config.api.timeout_seconds),
        };
        let client = Arc::new(
            ApiClient::new(api_config, Arc::clone(&session)).map_err(ModbayError::from)?,
        );

        let modules = Arc::new(ModulesApi::new(Arc::clone(&client)));
        let status_source = Arc::new(ApiWebhookStatusSource::new(Arc::clone(&modules)));
        let verifier = WebhookVerifier::new(status_source, config.verification.clone());

        Ok(Self {
            auth: AuthApi::new(Arc::clone(&client)),
            stats: StatsApi::new(client),
            session,
            modules,
            verifier,
            config,
        })
    }
}
