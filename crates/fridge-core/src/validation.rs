//! # Validation Module
//!
//! Input validation for inventory operations.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI argument parsing (clap)                                  │
//! │  └── Type validation (integers only)                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: InventoryStore implementations                               │
//! │  └── THIS MODULE: amount > 0, quantity >= 0, name present              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database                                                     │
//! │  └── WHERE current_quantity >= amount (atomic guard)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both stores call these before any mutation, so a rejected call never
//! reaches the backend.

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum accepted product name length.
pub const MAX_NAME_LEN: usize = 200;

/// Validates an absolute stock quantity (`set_quantity`).
///
/// ## Rules
/// - Must be zero or greater
///
/// ## Example
/// ```rust
/// use fridge_core::validation::validate_quantity;
///
/// assert!(validate_quantity(0).is_ok());
/// assert!(validate_quantity(-1).is_err());
/// ```
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "quantity".to_string(),
            value: quantity,
        });
    }

    Ok(())
}

/// Validates an increment/decrement amount.
///
/// ## Rules
/// - Must be strictly positive
pub fn validate_amount(amount: i64) -> ValidationResult<()> {
    if amount <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
            value: amount,
        });
    }

    Ok(())
}

/// Validates a product name.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(0).is_ok());
        assert!(validate_quantity(25).is_ok());
        assert_eq!(
            validate_quantity(-1),
            Err(ValidationError::MustBeNonNegative {
                field: "quantity".to_string(),
                value: -1
            })
        );
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(1).is_ok());
        assert!(validate_amount(0).is_err());
        assert!(validate_amount(-3).is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Cottage cheese").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }
}
