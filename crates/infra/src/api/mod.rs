//! Marketplace API client
//!
//! HTTP surface of the remote marketplace, split into:
//!
//! - [`client`] — authenticated request issuance with refresh-on-401
//! - [`auth`] — `/auth/*` account endpoints
//! - [`modules`] — `/modules*` endpoints and the webhook status adapter
//! - [`stats`] — aggregate marketplace counters
//! - [`errors`] — the error taxonomy the UI layer consumes

pub mod auth;
pub mod client;
pub mod errors;
pub mod modules;
pub mod stats;

pub use auth::{AuthApi, AuthSuccess};
pub use client::{ApiClient, ApiClientConfig};
pub use errors::ApiError;
pub use modules::{ApiWebhookStatusSource, ModulesApi, RegistrationResponse};
pub use stats::StatsApi;
