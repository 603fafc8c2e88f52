//! Module endpoints
//!
//! Typed surface over `/modules*`, plus the webhook status adapter the
//! verification poller runs against.

use std::sync::Arc;

use async_trait::async_trait;
use modbay_core::{ModuleQuery, WebhookStatusSource};
use modbay_domain::{Module, ModulePage, Result as DomainResult, WebhookSetup};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::client::ApiClient;
use super::errors::ApiError;

#[derive(Debug, Serialize)]
struct RegisterModuleRequest<'a> {
    github_url: &'a str,
    documentation: &'a str,
}

#[derive(Debug, Deserialize)]
struct ModuleEnvelope {
    module: Module,
}

#[derive(Debug, Deserialize)]
struct ModulesEnvelope {
    #[serde(default)]
    modules: Vec<Module>,
}

#[derive(Debug, Deserialize)]
struct SyncResponse {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WebhookStatusResponse {
    #[serde(default)]
    verified: bool,
}

/// Response of `POST /modules`
///
/// `webhook_setup` is present when the server wants the user to configure the
/// GitHub webhook; its fields are passed through exactly as received.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationResponse {
    pub module: Module,
    #[serde(default)]
    pub webhook_setup: Option<WebhookSetup>,
}

/// `/modules*` endpoint surface
pub struct ModulesApi {
    client: Arc<ApiClient>,
}

impl ModulesApi {
    /// Create the surface over the given client
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// `GET /modules` with the given listing query
    ///
    /// # Errors
    /// Returns error on transport failure
    pub async fn list(&self, query: &ModuleQuery) -> Result<ModulePage, ApiError> {
        self.client.get(&query.to_path()).await
    }

    /// `GET /modules/:slug`
    ///
    /// # Errors
    /// Returns error if the module does not exist
    pub async fn get(&self, slug: &str) -> Result<Module, ApiError> {
        let envelope: ModuleEnvelope = self.client.get(&format!("/modules/{slug}")).await?;
        Ok(envelope.module)
    }

    /// `POST /modules` — register a module from its GitHub repository
    ///
    /// # Errors
    /// Returns error if registration is rejected
    pub async fn register(
        &self,
        github_url: &str,
        documentation: &str,
    ) -> Result<RegistrationResponse, ApiError> {
        self.client
            .post("/modules", &RegisterModuleRequest { github_url, documentation })
            .await
    }

    /// `PUT /modules/:slug` — pull the latest state from GitHub
    ///
    /// # Errors
    /// Returns error if the sync fails server-side
    pub async fn sync(&self, slug: &str) -> Result<String, ApiError> {
        let response: SyncResponse =
            self.client.put(&format!("/modules/{slug}"), &serde_json::json!({})).await?;
        Ok(response.message.unwrap_or_else(|| "Module synced".to_string()))
    }

    /// `DELETE /modules/:slug`
    ///
    /// # Errors
    /// Returns error if the caller does not own the module
    pub async fn delete(&self, slug: &str) -> Result<(), ApiError> {
        self.client.send(Method::DELETE, &format!("/modules/{slug}"), None).await.map(|_| ())
    }

    /// `GET /modules/:slug/webhook-status`
    ///
    /// # Errors
    /// Returns error on transport failure (the poller treats it as transient)
    pub async fn webhook_verified(&self, slug: &str) -> Result<bool, ApiError> {
        let response: WebhookStatusResponse =
            self.client.get(&format!("/modules/{slug}/webhook-status")).await?;
        Ok(response.verified)
    }

    /// `GET /modules/mine`
    ///
    /// # Errors
    /// Returns error if the caller is not authenticated
    pub async fn mine(&self) -> Result<Vec<Module>, ApiError> {
        let envelope: ModulesEnvelope = self.client.get("/modules/mine").await?;
        Ok(envelope.modules)
    }
}

/// Webhook status port implementation backed by the marketplace API
pub struct ApiWebhookStatusSource {
    modules: Arc<ModulesApi>,
}

impl ApiWebhookStatusSource {
    /// Create the adapter over the modules surface
    #[must_use]
    pub fn new(modules: Arc<ModulesApi>) -> Self {
        Self { modules }
    }
}

#[async_trait]
impl WebhookStatusSource for ApiWebhookStatusSource {
    async fn verified(&self, slug: &str) -> DomainResult<bool> {
        self.modules.webhook_verified(slug).await.map_err(Into::into)
    }
}
