//! # Error Types
//!
//! Domain-specific error types for fridge-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  fridge-core errors (this file)                                        │
//! │  ├── CoreError        - Outcome of every InventoryStore operation      │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  fridge-db errors (separate crate)                                     │
//! │  ├── DbError          - Database operation failures                    │
//! │  └── ResolveError     - Connection fallback exhausted                  │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── ApiError         - What the operator sees                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError ← DbError;  CoreError → ApiError    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant of [`CoreError`] leaves the store untouched: operations are
//! single-row, so a rejected call never produces a partial mutation.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors returned by [`InventoryStore`](crate::store::InventoryStore) operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No live backend behind the store.
    ///
    /// ## When This Occurs
    /// - The connection pool was closed (shutdown, lost handle)
    #[error("Inventory store unavailable: {0}")]
    Unavailable(String),

    /// Argument rejected before touching the store.
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ValidationError),

    /// No product row matches the id.
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    /// Decrement would drive the quantity below zero.
    ///
    /// ## User Workflow
    /// ```text
    /// remove 5 (olives)
    ///      │
    ///      ▼
    /// UPDATE ... WHERE current_quantity >= 5  → 0 rows
    ///      │
    ///      ▼
    /// InsufficientQuantity { id: 5, available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// CLI shows: "only 3 in stock"
    /// ```
    #[error("Insufficient quantity for product {id}: available {available}, requested {requested}")]
    InsufficientQuantity {
        id: i64,
        available: i64,
        requested: i64,
    },

    /// The backend failed for a reason outside the inventory contract.
    #[error("Backend error: {0}")]
    Backend(String),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly positive.
    #[error("{field} must be positive, got {value}")]
    MustBePositive { field: String, value: i64 },

    /// Value must be zero or greater.
    #[error("{field} must not be negative, got {value}")]
    MustBeNonNegative { field: String, value: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
