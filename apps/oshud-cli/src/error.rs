//! # CLI Error Types
//!
//! `ApiError` is what a command returns on failure. With `--json` it is
//! printed as-is; otherwise only the message is shown.
//!
//! ```text
//! ValidationError ─► CoreError ─► StoreError ─► ApiError ─► stdout/stderr
//!                                                   ▲
//! ConfigError ──────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use oshud_core::{CoreError, ValidationError};
use oshud_store::StoreError;
use serde::Serialize;
use thiserror::Error;

/// Error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Salary record not found: 7"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for scripts
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Record or employee not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Data file could not be read or written
    StorageError,

    /// Configuration could not be loaded
    ConfigError,

    /// Anything else
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts store errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            StoreError::Core(e) => e.into(),
            e @ (StoreError::Io { .. } | StoreError::Decode { .. }) => {
                tracing::error!(error = %e, "Data file access failed");
                ApiError::new(ErrorCode::StorageError, e.to_string())
            }
            StoreError::Encode(e) => {
                tracing::error!(error = %e, "Document encoding failed");
                ApiError::new(ErrorCode::StorageError, "Failed to encode data file")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            e @ (CoreError::InvalidRecord { .. }
            | CoreError::EmptyCart
            | CoreError::EmptyRoster) => ApiError::validation(e.to_string()),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors from loading, validating or saving `oshud.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to encode config: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("Failed to write config: {0}")]
    Write(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("No config path available")]
    NoPath,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_not_found_maps_to_not_found() {
        let err: ApiError = StoreError::not_found("Salary record", 3).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Salary record not found: 3");
    }

    #[test]
    fn test_invalid_record_maps_to_validation() {
        let err: ApiError = CoreError::InvalidRecord {
            errors: vec![ValidationError::Required {
                field: "month".to_string(),
            }],
        }
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("month is required"));
    }

    #[test]
    fn test_wrapped_core_error_keeps_validation_code() {
        let err: ApiError = StoreError::from(CoreError::EmptyRoster).into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "No employees to process");
    }

    #[test]
    fn test_serializes_screaming_code() {
        let err = ApiError::not_found("Employee", "e9");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Employee not found: e9");
    }
}
