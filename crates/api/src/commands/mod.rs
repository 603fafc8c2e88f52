//! Command layer
//!
//! The presenter boundary: plain async functions over [`crate::AppContext`]
//! that return typed data. Client-side validation failures short-circuit
//! before any request is issued.

pub mod auth;
pub mod modules;
pub mod publish;
pub mod stats;

use modbay_core::ValidationError;
use modbay_domain::ModbayError;

/// Validation failures surface as invalid-input domain errors
pub(crate) fn invalid(err: ValidationError) -> ModbayError {
    ModbayError::InvalidInput(err.to_string())
}
