//! # API Error Type
//!
//! Unified error type for CLI commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Fridge Manager                         │
//! │                                                                         │
//! │  Command Function                                                      │
//! │  Result<T, ApiError>                                                   │
//! │         │                                                               │
//! │         ├── CoreError   (store contract: not found, insufficient, ...) │
//! │         ├── DbError     (query failures outside the store trait)       │
//! │         ├── ExportError (file writes, decoding)                        │
//! │         └── ConfigError (startup only)                                 │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │               ApiError { code, message }                               │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  one-shot command: "error: <message>" on stderr, exit status 1         │
//! │  shell:            "error: <message>", prompt continues                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use fridge_core::CoreError;
use fridge_db::DbError;
use fridge_export::ExportError;
use serde::Serialize;

use crate::state::ConfigError;

/// Error reported to the operator.
///
/// ## Serialization
/// With `--json` output, failures are printed as:
/// ```json
/// { "code": "INSUFFICIENT_QUANTITY", "message": "Only 3 packs of product 5 left, cannot remove 4" }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product id does not exist
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Removal would take stock below zero
    InsufficientQuantity,

    /// No live database handle
    Unavailable,

    /// Database operation failed
    DatabaseError,

    /// Report or export file could not be written
    WriteFailed,

    /// Export file could not be read or decoded
    ExportError,

    /// Bad configuration
    ConfigError,

    /// Internal error
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

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => {
                ApiError::new(ErrorCode::NotFound, format!("Product not found: {}", id))
            }
            CoreError::InsufficientQuantity {
                id,
                available,
                requested,
            } => ApiError::new(
                ErrorCode::InsufficientQuantity,
                format!(
                    "Only {} packs of product {} left, cannot remove {}",
                    available, id, requested
                ),
            ),
            CoreError::InvalidArgument(e) => ApiError::validation(e.to_string()),
            CoreError::Unavailable(reason) => ApiError::new(
                ErrorCode::Unavailable,
                format!("Database unavailable: {}", reason),
            ),
            CoreError::Backend(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Inventory backend failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        ApiError::from(CoreError::from(err))
    }
}

/// Converts export errors to API errors.
impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::WriteFailed { .. } => ApiError::new(ErrorCode::WriteFailed, err.to_string()),
            ExportError::InvalidProduct { .. } => ApiError::validation(err.to_string()),
            other => ApiError::new(ErrorCode::ExportError, other.to_string()),
        }
    }
}

/// Converts configuration errors to API errors.
impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

/// Terminal output failures.
impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::internal(format!("Output failed: {}", err))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::internal(format!("JSON encoding failed: {}", err))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
