//! # Database Error Types
//!
//! Error types for database operations and connection resolution.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  sqlx::Error                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CoreError ← What InventoryStore callers match on                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in CLI) ← Printed for the operator                          │
//! │                                                                         │
//! │  Connection resolution is separate:                                    │
//! │  AttemptFailure (per profile) ──► ResolveError (all profiles failed)   │
//! │  Neither is ever surfaced as a crash; the CLI degrades to local mode.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use fridge_core::{CoreError, ValidationError};
use sqlx::error::ErrorKind;
use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    ///
    /// ## When This Occurs
    /// - `UPDATE ... WHERE id = ?` affected zero rows
    /// - `fetch_one` returned no rows
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation.
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// Conditional decrement refused: not enough stock.
    #[error("Insufficient quantity for product {id}: available {available}, requested {requested}")]
    InsufficientQuantity {
        id: i64,
        available: i64,
        requested: i64,
    },

    /// Argument rejected before any query was issued.
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ValidationError),

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Server not reachable, authentication rejected
    /// - Connect timeout elapsed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Query execution failed.
    ///
    /// ## When This Occurs
    /// - Missing table or column
    /// - Runtime SQL error
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// The handle was closed; no live backend.
    #[error("Connection pool is closed")]
    PoolClosed,

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → UniqueViolation / QueryFailed
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// sqlx::Error::PoolClosed     → DbError::PoolClosed
/// Io / Tls / Configuration    → DbError::ConnectionFailed
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                if matches!(db_err.kind(), ErrorKind::UniqueViolation) {
                    DbError::UniqueViolation {
                        field: db_err.constraint().unwrap_or("unknown").to_string(),
                        value: "unknown".to_string(),
                    }
                } else {
                    DbError::QueryFailed(db_err.message().to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::PoolClosed,

            sqlx::Error::Io(_) | sqlx::Error::Tls(_) | sqlx::Error::Configuration(_) => {
                DbError::ConnectionFailed(err.to_string())
            }

            _ => DbError::Internal(err.to_string()),
        }
    }
}

/// Maps database failures onto the inventory contract.
impl From<DbError> for CoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { id, .. } => match id.parse() {
                Ok(id) => CoreError::ProductNotFound(id),
                Err(_) => CoreError::Backend(format!("Record not found: {id}")),
            },
            DbError::InsufficientQuantity {
                id,
                available,
                requested,
            } => CoreError::InsufficientQuantity {
                id,
                available,
                requested,
            },
            DbError::InvalidArgument(e) => CoreError::InvalidArgument(e),
            DbError::PoolClosed => CoreError::Unavailable("database connection is closed".into()),
            DbError::ConnectionFailed(reason) => CoreError::Unavailable(reason),
            other => CoreError::Backend(other.to_string()),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Connection Resolution Errors
// =============================================================================

/// Why a single connection profile was skipped.
///
/// Both variants are recoverable: the resolver moves on to the next profile.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttemptFailure {
    /// Opening the connection failed or timed out.
    #[error("profile '{profile}': connection failed: {reason}")]
    ConnectionOpenFailed { profile: String, reason: String },

    /// The connection opened but did not answer `SELECT 1`.
    #[error("profile '{profile}': liveness probe failed: {reason}")]
    ProbeFailed { profile: String, reason: String },
}

impl AttemptFailure {
    /// Name of the profile this failure belongs to.
    pub fn profile(&self) -> &str {
        match self {
            AttemptFailure::ConnectionOpenFailed { profile, .. }
            | AttemptFailure::ProbeFailed { profile, .. } => profile,
        }
    }
}

/// Terminal outcome of a resolution that reached no live backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The profile list was empty.
    #[error("No connection profiles configured")]
    NoProfiles,

    /// Every profile was tried once and none produced a live connection.
    #[error("All {} connection profiles exhausted; last failure: {}", .failures.len(), last_reason(.failures))]
    AllProfilesExhausted { failures: Vec<AttemptFailure> },
}

impl ResolveError {
    /// The last observed failure, if any profile was tried.
    pub fn last_failure(&self) -> Option<&AttemptFailure> {
        match self {
            ResolveError::NoProfiles => None,
            ResolveError::AllProfilesExhausted { failures } => failures.last(),
        }
    }
}

fn last_reason(failures: &[AttemptFailure]) -> String {
    failures
        .last()
        .map(ToString::to_string)
        .unwrap_or_else(|| "none".to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_product_not_found() {
        let core: CoreError = DbError::not_found("Product", 7).into();
        assert!(matches!(core, CoreError::ProductNotFound(7)));
    }

    #[test]
    fn test_pool_closed_maps_to_unavailable() {
        let core: CoreError = DbError::from(sqlx::Error::PoolClosed).into();
        assert!(matches!(core, CoreError::Unavailable(_)));
    }

    #[test]
    fn test_resolve_error_reports_last_failure() {
        let err = ResolveError::AllProfilesExhausted {
            failures: vec![
                AttemptFailure::ConnectionOpenFailed {
                    profile: "peer".into(),
                    reason: "no such socket".into(),
                },
                AttemptFailure::ProbeFailed {
                    profile: "tcp".into(),
                    reason: "closed".into(),
                },
            ],
        };
        assert_eq!(err.last_failure().map(AttemptFailure::profile), Some("tcp"));
        assert_eq!(
            err.to_string(),
            "All 2 connection profiles exhausted; last failure: profile 'tcp': liveness probe failed: closed"
        );
        assert_eq!(ResolveError::NoProfiles.last_failure(), None);
    }
}
