//! Authenticated marketplace API client
//!
//! Wraps the HTTP transport with uniform request issuance: bearer header
//! injection, a one-shot refresh-and-retry cycle on expired credentials, and
//! tolerant JSON body handling.
//!
//! Guarantees:
//! - At most one refresh-triggered retry per original call
//! - The refresh endpoint never recurses into its own 401 handling
//! - A failed refresh clears the session, which broadcasts the logout signal
//!   to session observers exactly once

use std::sync::Arc;
use std::time::Duration;

use modbay_core::SessionService;
use modbay_domain::constants::{DEFAULT_BASE_URL, DEFAULT_HTTP_TIMEOUT_SECS};
use reqwest::{header, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::errors::ApiError;
use crate::http::HttpClient;

/// Endpoints where a 401 means bad credentials rather than an expired token;
/// these never trigger the refresh cycle.
const AUTH_EXEMPT_PATHS: &[&str] =
    &["/auth/login", "/auth/register", "/auth/refresh", "/auth/logout"];

fn is_auth_exempt(path: &str) -> bool {
    AUTH_EXEMPT_PATHS.contains(&path)
}

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL request paths are appended to (e.g., "https://api.modbay.io")
    pub base_url: String,
    /// Timeout for API requests
    pub timeout: Duration,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

/// API client with bearer auth and refresh-on-401
pub struct ApiClient {
    http: HttpClient,
    session: Arc<SessionService>,
    config: ApiClientConfig,
    /// Serializes refresh attempts so concurrent 401s trigger one refresh
    refresh_gate: Mutex<()>,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// # Errors
    ///
    /// Returns error if the underlying HTTP client cannot be built
    pub fn new(config: ApiClientConfig, session: Arc<SessionService>) -> Result<Self, ApiError> {
        let http = HttpClient::builder()
            .timeout(config.timeout)
            .cookie_store(true)
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, session, config, refresh_gate: Mutex::new(()) })
    }

    /// Base URL this client talks to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Execute a GET request and decode the response
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be decoded
    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let value = self.send(Method::GET, path, None).await?;
        Self::decode(path, value)
    }

    /// Execute a POST request with a JSON body and decode the response
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be decoded
    pub async fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        let body = Self::encode(body)?;
        let value = self.send(Method::POST, path, Some(body)).await?;
        Self::decode(path, value)
    }

    /// Execute a PUT request with a JSON body and decode the response
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be decoded
    pub async fn put<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        let body = Self::encode(body)?;
        let value = self.send(Method::PUT, path, Some(body)).await?;
        Self::decode(path, value)
    }

    /// Execute a request and return the raw JSON body
    ///
    /// This is the single entry point every call goes through; the typed
    /// helpers decode on top of it. Empty and non-JSON bodies come back as
    /// `{}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Api`] on non-2xx responses (after any retry) and
    /// [`ApiError::Connection`] when no response was received
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let token = self.session.access_token().await;
        let response = self.send_once(method.clone(), path, body.as_ref(), token.as_deref()).await?;

        if response.status() == StatusCode::UNAUTHORIZED && !is_auth_exempt(path) {
            debug!(path, "received 401, attempting token refresh");
            return match self.refresh_access_token(token.as_deref()).await {
                Ok(fresh) => {
                    let retry = self.send_once(method, path, body.as_ref(), Some(&fresh)).await?;
                    Self::into_result(retry).await
                }
                Err(refresh_err) => {
                    warn!(path, error = %refresh_err, "token refresh failed, clearing session");
                    if let Err(err) = self.session.clear().await {
                        warn!(error = %err, "failed to clear persisted session");
                    }
                    Self::into_result(response).await
                }
            };
        }

        Self::into_result(response).await
    }

    async fn send_once(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> Result<Response, ApiError> {
        let url = format!("{}{}", self.config.base_url, path);

        let mut request = self
            .http
            .request(method, &url)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        self.http.send(request).await.map_err(ApiError::from)
    }

    /// Refresh the access token, deduplicating concurrent attempts
    ///
    /// `failed_token` is the token the 401 was observed with; when the
    /// session already holds a different token by the time the gate is
    /// acquired, another call refreshed first and that token is reused.
    async fn refresh_access_token(&self, failed_token: Option<&str>) -> Result<String, ApiError> {
        let _gate = self.refresh_gate.lock().await;

        if let Some(current) = self.session.access_token().await {
            if Some(current.as_str()) != failed_token {
                debug!("token already refreshed by a concurrent call");
                return Ok(current);
            }
        }

        let response =
            self.send_once(Method::POST, "/auth/refresh", None, failed_token).await?;
        let body = Self::into_result(response).await?;

        let token = body
            .get("access_token")
            .and_then(Value::as_str)
            .map(String::from)
            .ok_or_else(|| {
                ApiError::from_response(StatusCode::UNAUTHORIZED, body.clone())
            })?;

        if let Err(err) = self.session.replace_token(token.clone()).await {
            warn!(error = %err, "failed to persist refreshed token");
        }
        debug!("access token refreshed");

        Ok(token)
    }

    /// Parse a response body, tolerating empty and non-JSON payloads
    async fn into_result(response: Response) -> Result<Value, ApiError> {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let body: Value = if text.trim().is_empty() {
            json!({})
        } else {
            serde_json::from_str(&text).unwrap_or_else(|_| json!({}))
        };

        if status.is_success() {
            Ok(body)
        } else {
            Err(ApiError::from_response(status, body))
        }
    }

    fn encode<B: Serialize>(body: &B) -> Result<Value, ApiError> {
        serde_json::to_value(body)
            .map_err(|e| ApiError::Config(format!("failed to serialize request body: {e}")))
    }

    fn decode<R: DeserializeOwned>(path: &str, value: Value) -> Result<R, ApiError> {
        serde_json::from_value(value)
            .map_err(|e| ApiError::Config(format!("unexpected response shape for {path}: {e}")))
    }
}
