//! Domain error types
//!
//! This module defines the error hierarchy for signpack. Validation errors
//! stop the pipeline before any remote call; signing-service errors carry a
//! transient/permanent classification so per-document fetch failures can be
//! reported without aborting an export. No third-party error types leak out.

use crate::domain::ids::DocumentId;
use chrono::NaiveDate;
use thiserror::Error;

/// Main signpack error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum SignPackError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Request validation errors (bad filter, bad selection)
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Signing-service errors
    #[error("Signing service error: {0}")]
    Service(#[from] SignServiceError),

    /// Every selected document failed to fetch; no archive was produced
    #[error("All {attempted} selected documents failed to fetch")]
    AllFetchesFailed { attempted: usize },

    /// Export process errors (archive assembly, output writing)
    #[error("Export error: {0}")]
    Export(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Request validation errors
///
/// These are user-fixable errors surfaced before any catalog or content
/// fetch happens. They are never retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Date range start is after its end
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    /// Selection contains no identifiers
    #[error("Nothing to export: selection is empty")]
    EmptySelection,

    /// Selection references an identifier outside the current filtered view
    #[error("Document {0} is not present in the current view")]
    DocumentNotInView(DocumentId),
}

/// Signing-service errors
///
/// Errors that occur when talking to the external e-signature service.
/// `is_transient` drives how a per-document fetch failure is classified
/// in the export report.
#[derive(Debug, Error)]
pub enum SignServiceError {
    /// Failed to connect to the signing service
    #[error("Failed to connect to signing service: {0}")]
    ConnectionFailed(String),

    /// Request timed out
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Authentication failed (bad token or crypt key)
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The service returned a body the adapter could not interpret
    #[error("Invalid response from signing service: {0}")]
    InvalidResponse(String),

    /// The document does not exist or was revoked on the service side
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },
}

impl SignServiceError {
    /// Whether a retry at a later time could plausibly succeed
    ///
    /// Network failures, timeouts, and server-side errors are transient;
    /// missing documents and client errors are permanent.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            SignServiceError::ConnectionFailed(_)
                | SignServiceError::Timeout(_)
                | SignServiceError::ServerError { .. }
        )
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for SignPackError {
    fn from(err: std::io::Error) -> Self {
        SignPackError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for SignPackError {
    fn from(err: serde_json::Error) -> Self {
        SignPackError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for SignPackError {
    fn from(err: toml::de::Error) -> Self {
        SignPackError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Zip container errors surface as export errors
impl From<zip::result::ZipError> for SignPackError {
    fn from(err: zip::result::ZipError) -> Self {
        SignPackError::Export(format!("Archive write failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signpack_error_display() {
        let err = SignPackError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_validation_error_conversion() {
        let validation = ValidationError::EmptySelection;
        let err: SignPackError = validation.into();
        assert!(matches!(err, SignPackError::Validation(_)));
    }

    #[test]
    fn test_service_error_conversion() {
        let service = SignServiceError::Timeout("30s elapsed".to_string());
        let err: SignPackError = service.into();
        assert!(matches!(err, SignPackError::Service(_)));
    }

    #[test]
    fn test_transient_classification() {
        assert!(SignServiceError::ConnectionFailed("refused".into()).is_transient());
        assert!(SignServiceError::Timeout("30s".into()).is_transient());
        assert!(SignServiceError::ServerError {
            status: 503,
            message: "unavailable".into()
        }
        .is_transient());

        assert!(!SignServiceError::DocumentNotFound("doc-1".into()).is_transient());
        assert!(!SignServiceError::ClientError {
            status: 403,
            message: "forbidden".into()
        }
        .is_transient());
        assert!(!SignServiceError::InvalidResponse("bad json".into()).is_transient());
    }

    #[test]
    fn test_invalid_date_range_names_both_endpoints() {
        let err = ValidationError::InvalidDateRange {
            start: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        };
        let msg = err.to_string();
        assert!(msg.contains("2025-01-10"));
        assert!(msg.contains("2025-01-01"));
    }

    #[test]
    fn test_document_not_in_view_names_offender() {
        use crate::domain::ids::DocumentId;
        use std::str::FromStr;

        let id = DocumentId::from_str("abc-123").unwrap();
        let err = ValidationError::DocumentNotInView(id);
        assert!(err.to_string().contains("abc-123"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: SignPackError = io_err.into();
        assert!(matches!(err, SignPackError::Io(_)));
    }

    #[test]
    fn test_errors_implement_std_error() {
        let err = SignPackError::Export("test".to_string());
        let _: &dyn std::error::Error = &err;
        let err = SignServiceError::ConnectionFailed("test".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
