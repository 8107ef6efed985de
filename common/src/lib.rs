//! Common types and utilities for the node gateway
//!
//! This library contains the shared error type, the scaled exchange-rate
//! arithmetic used by the DAO-coin limit-order book, and the domain models
//! exchanged between the gateway crates and the chain view.

pub mod error;
pub mod exchange;
pub mod model;

/// Re-export important types
pub use error::{Error, Result, ErrorExt, IntoError};
pub use exchange::{U256, U512};

// Re-export utoipa for use in model ToSchema derives
#[cfg(feature = "utoipa")]
pub use utoipa;
