//! Custom error types for txseal
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use std::fmt;

use thiserror::Error;

/// Why a sealed blob could not be opened
///
/// Kept for internal diagnostics only. Both variants render to the same
/// user-facing message so a caller cannot tell a wrong passphrase from a
/// damaged file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// Blob is shorter than nonce + tag
    Truncated { len: usize },
    /// Tag did not verify (wrong key or altered bytes)
    TagMismatch,
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not open file with that key")
    }
}

/// The main error type for txseal operations
#[derive(Error, Debug)]
pub enum TxsealError {
    /// Key derivation errors
    #[error("Key derivation error: {0}")]
    KeyDerivation(String),

    /// Record payload could not be serialized
    #[error("Encode error: {0}")]
    Encode(String),

    /// Record payload could not be deserialized
    #[error("Decode error: {0}")]
    Decode(String),

    /// Sealed blob failed to open
    #[error("{0}")]
    Authentication(AuthFailure),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors outside the record payload
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Record store errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// A file could not be opened, read or written
    #[error("Cannot access {path}: {reason}")]
    ResourceAccess { path: String, reason: String },

    /// Background worker failed
    #[error("Worker error: {0}")]
    Worker(String),
}

impl TxsealError {
    /// Create a resource access error for a path
    pub fn resource_access(path: impl AsRef<std::path::Path>, reason: impl fmt::Display) -> Self {
        Self::ResourceAccess {
            path: path.as_ref().display().to_string(),
            reason: reason.to_string(),
        }
    }

    /// Check if this is an authentication error
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }

    /// Check if this is a decode error
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }

    /// Check if this is a storage error
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }

    /// Short machine-readable kind, used by the audit log
    pub fn kind(&self) -> &'static str {
        match self {
            Self::KeyDerivation(_) => "key_derivation",
            Self::Encode(_) => "encode",
            Self::Decode(_) => "decode",
            Self::Authentication(_) => "authentication",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
            Self::Json(_) => "json",
            Self::Validation(_) => "validation",
            Self::Storage(_) => "storage",
            Self::ResourceAccess { .. } => "resource_access",
            Self::Worker(_) => "worker",
        }
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for TxsealError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TxsealError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for txseal operations
pub type TxsealResult<T> = Result<T, TxsealError>;
