//! # Modbay App
//!
//! Application layer of the marketplace client: wires configuration, the
//! session service, the API client, and the verification poller into an
//! [`context::AppContext`], and exposes the command functions a rendering
//! layer (web, CLI, tests) calls.
//!
//! Commands return plain data and typed errors; nothing here touches
//! presentation.

pub mod commands;
pub mod context;
pub mod telemetry;

pub use context::AppContext;
