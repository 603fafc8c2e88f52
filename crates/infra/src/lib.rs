//! # Modbay Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - HTTP transport with retry and timeout support
//! - The authenticated marketplace API client and endpoint surfaces
//! - File-backed session persistence
//! - Configuration loading (environment and files)
//!
//! ## Architecture
//! - Implements traits defined in `modbay-core`
//! - Depends on `modbay-domain` and `modbay-core`
//! - Contains all "impure" code (network and filesystem I/O)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod storage;

// Re-export commonly used items
pub use api::{
    ApiClient, ApiClientConfig, ApiError, ApiWebhookStatusSource, AuthApi, AuthSuccess,
    ModulesApi, RegistrationResponse, StatsApi,
};
pub use errors::InfraError;
pub use http::HttpClient;
pub use storage::FileSessionStore;
