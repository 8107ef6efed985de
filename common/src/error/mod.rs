//! Error types for the node gateway
//!
//! This module provides a unified error handling system for every crate in
//! the workspace. Arithmetic failures of the exchange-rate engine, identifier
//! validation failures and chain-view failures all share one enum so that the
//! HTTP layer can map them to status codes in a single place.

use std::fmt::Display;
use thiserror::Error;

/// Node gateway error type
#[derive(Debug, Error)]
pub enum Error {
    /// A decimal or float input is not a valid numeral
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// A multiplication or scaling step exceeded 256 bits
    #[error("Overflow: {0}")]
    Overflow(String),

    /// A division or scaling step rounded a nonzero value down to zero
    #[error("Underflow: {0}")]
    Underflow(String),

    /// An operation-type or fill-type value has no matching variant
    #[error("Unknown enum value: {0}")]
    UnknownEnumValue(String),

    /// A public key failed Base58Check decoding or curve validation
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    /// An access group key name is out of bounds or reserved
    #[error("Invalid access group: {0}")]
    InvalidAccessGroup(String),

    /// Generic request validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The transactor cannot cover the selling side of an order
    #[error("Insufficient balance: {0}")]
    InsufficientBalance(String),

    /// A requested entity does not exist in the chain view
    #[error("Not found: {0}")]
    NotFound(String),

    /// The chain view or transaction constructor failed
    #[error("Chain view error: {0}")]
    View(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// True for the arithmetic failure classes of the exchange-rate engine
    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            Error::InvalidFormat(_) | Error::Overflow(_) | Error::Underflow(_)
        )
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait to add context to error results
pub trait ErrorExt<T> {
    /// Add context information to an error
    fn with_context<C, F>(self, context_fn: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display;
}

impl<T> ErrorExt<T> for Result<T> {
    fn with_context<C, F>(self, context_fn: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display,
    {
        self.map_err(|e| {
            let context = context_fn().to_string();
            match e {
                Error::InvalidFormat(msg) => Error::InvalidFormat(format!("{}: {}", context, msg)),
                Error::Overflow(msg) => Error::Overflow(format!("{}: {}", context, msg)),
                Error::Underflow(msg) => Error::Underflow(format!("{}: {}", context, msg)),
                Error::UnknownEnumValue(msg) => Error::UnknownEnumValue(format!("{}: {}", context, msg)),
                Error::InvalidPublicKey(msg) => Error::InvalidPublicKey(format!("{}: {}", context, msg)),
                Error::InvalidAccessGroup(msg) => Error::InvalidAccessGroup(format!("{}: {}", context, msg)),
                Error::ValidationError(msg) => Error::ValidationError(format!("{}: {}", context, msg)),
                Error::InsufficientBalance(msg) => Error::InsufficientBalance(format!("{}: {}", context, msg)),
                Error::NotFound(msg) => Error::NotFound(format!("{}: {}", context, msg)),
                Error::View(msg) => Error::View(format!("{}: {}", context, msg)),
                Error::Internal(msg) => Error::Internal(format!("{}: {}", context, msg)),
                Error::Serialization(e) => Error::Serialization(e),
            }
        })
    }
}

/// Trait for converting other error types to our Error type
pub trait IntoError {
    /// Convert to Error
    fn into_error(self, message: &str) -> Error;
}

impl<E: std::error::Error> IntoError for E {
    fn into_error(self, message: &str) -> Error {
        Error::Internal(format!("{}: {}", message, self))
    }
}

/// Convert string messages into an error
impl From<String> for Error {
    fn from(message: String) -> Self {
        Error::Internal(message)
    }
}

/// Convert static string references into an error
impl From<&str> for Error {
    fn from(message: &str) -> Self {
        Error::Internal(message.to_string())
    }
}
