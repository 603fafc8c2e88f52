//! Account endpoints
//!
//! Thin typed surface over `/auth/*`. Session state is owned by the caller;
//! these methods only speak the wire contract.

use std::sync::Arc;

use modbay_domain::User;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::client::ApiClient;
use super::errors::ApiError;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct UpdateProfileRequest<'a> {
    username: &'a str,
}

#[derive(Debug, Serialize)]
struct ChangePasswordRequest<'a> {
    current_password: &'a str,
    new_password: &'a str,
}

#[derive(Debug, Deserialize)]
struct UserEnvelope {
    user: User,
}

/// Credentials and profile returned by login/register
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSuccess {
    pub access_token: String,
    pub user: User,
}

/// `/auth/*` endpoint surface
pub struct AuthApi {
    client: Arc<ApiClient>,
}

impl AuthApi {
    /// Create the surface over the given client
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// `POST /auth/login`
    ///
    /// # Errors
    /// Returns error on bad credentials or transport failure
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSuccess, ApiError> {
        self.client.post("/auth/login", &LoginRequest { email, password }).await
    }

    /// `POST /auth/register`
    ///
    /// # Errors
    /// Returns error if the account cannot be created
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthSuccess, ApiError> {
        self.client.post("/auth/register", &RegisterRequest { username, email, password }).await
    }

    /// `POST /auth/logout` — invalidates the server-side refresh credential
    ///
    /// # Errors
    /// Returns error on transport failure (callers typically ignore it)
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.client.send(Method::POST, "/auth/logout", None).await.map(|_| ())
    }

    /// `GET /auth/me` — validates the current token and returns the profile
    ///
    /// # Errors
    /// Returns error if the token is invalid after any refresh
    pub async fn me(&self) -> Result<User, ApiError> {
        let envelope: UserEnvelope = self.client.get("/auth/me").await?;
        Ok(envelope.user)
    }

    /// `PUT /auth/me`
    ///
    /// # Errors
    /// Returns error if the profile cannot be updated
    pub async fn update_profile(&self, username: &str) -> Result<User, ApiError> {
        let envelope: UserEnvelope =
            self.client.put("/auth/me", &UpdateProfileRequest { username }).await?;
        Ok(envelope.user)
    }

    /// `PUT /auth/password`
    ///
    /// # Errors
    /// Returns error if the current password is wrong
    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        let body = serde_json::to_value(ChangePasswordRequest { current_password, new_password })
            .map_err(|e| ApiError::Config(format!("failed to serialize request body: {e}")))?;
        self.client.send(Method::PUT, "/auth/password", Some(body)).await.map(|_| ())
    }

    /// `DELETE /auth/me` — irreversible account deletion
    ///
    /// # Errors
    /// Returns error if the server refuses the deletion
    pub async fn delete_account(&self) -> Result<(), ApiError> {
        self.client.send(Method::DELETE, "/auth/me", None).await.map(|_| ())
    }
}
