//! Error types for the HCMS portal.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire portal.
///
/// Every API port, storage backend and page controller reports failures
/// through this type, so callers branch on one taxonomy instead of a mix of
/// sentinel values and panics.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HcmsError {
    /// The request never produced a response (connection refused, timeout, DNS).
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The backend rejected the token (401/403).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Login was refused.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// A successful response carried a malformed or incomplete payload.
    #[error("Payload error: {0}")]
    Payload(String),

    /// Client-side validation failed before any request was sent.
    #[error("{0}")]
    Validation(String),

    /// Persisted key/value storage failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HcmsError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates an Http error
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates a Payload error
    pub fn payload(message: impl Into<String>) -> Self {
        Self::Payload(message.into())
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if the token was rejected, which ends the session.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// Check if this is a transport failure
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// The backend answered 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Http { status: 404, .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for HcmsError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(format!("{} (kind: {:?})", err, err.kind()))
    }
}

impl From<serde_json::Error> for HcmsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for HcmsError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, HcmsError>`.
pub type Result<T> = std::result::Result<T, HcmsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_404_counts_as_not_found() {
        assert!(HcmsError::http(404, "missing").is_not_found());
        assert!(!HcmsError::http(500, "boom").is_not_found());
    }

    #[test]
    fn test_validation_message_is_displayed_verbatim() {
        let err = HcmsError::validation("Medication and Dosage are required.");
        assert_eq!(err.to_string(), "Medication and Dosage are required.");
        assert!(err.is_validation());
    }

    #[test]
    fn test_io_error_maps_to_storage() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: HcmsError = io.into();
        assert!(matches!(err, HcmsError::Storage(_)));
    }
}
