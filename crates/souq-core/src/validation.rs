//! # Validation Module
//!
//! Business rule validation for catalog-management writes.
//!
//! ## Validation Strategy
//! The engine itself assumes a well-formed catalog (the graph builder
//! re-checks referential integrity on every load); these validators exist
//! for the catalog-management layer to run *before* a write reaches the
//! store, so the builder's integrity faults stay rare.
//!
//! ## Usage
//! ```rust
//! use souq_core::validation::{validate_item_name, validate_cart_quantity};
//!
//! validate_item_name("Chicken Shawarma").unwrap();
//! validate_cart_quantity(5).unwrap();
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_LINE_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an item or ingredient display name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates an entity id string.
///
/// ## Rules
/// - Must be a valid UUID format
pub fn validate_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a cart or bundle-component quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed [`MAX_LINE_QUANTITY`]
pub fn validate_cart_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a recipe line quantity.
///
/// ## Rules
/// - Must be strictly positive; fractional values are fine (0.5 kg)
pub fn validate_recipe_quantity(qty: Decimal) -> ValidationResult<()> {
    if qty <= Decimal::ZERO {
        return Err(ValidationError::MustBePositive {
            field: "recipe quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a selling price or ingredient cost.
///
/// ## Rules
/// - Must be non-negative; zero is allowed (free items, untracked costs)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a stock counter value at write time.
///
/// ## Rules
/// - Must be non-negative; the store's atomic decrement keeps it so
pub fn validate_stock(stock: Decimal) -> ValidationResult<()> {
    if stock < Decimal::ZERO {
        return Err(ValidationError::MustNotBeNegative {
            field: "stock".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
