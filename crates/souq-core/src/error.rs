//! # Error Types
//!
//! Domain-specific error types for souq-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  souq-core errors (this file)                                          │
//! │  ├── CatalogError     - data-integrity faults at graph build           │
//! │  ├── CostError        - cost resolution failures                       │
//! │  ├── PlanError        - checkout-integrity faults at planning          │
//! │  ├── ValidationError  - input validation failures                      │
//! │  └── CoreError        - umbrella over all of the above                 │
//! │                                                                         │
//! │  souq-store errors (separate crate)                                    │
//! │  ├── StoreError       - counter/store operation failures               │
//! │  └── CheckoutError    - settlement failures incl. partial settlement   │
//! │                                                                         │
//! │  Flow: CatalogError/PlanError → CheckoutError → caller                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item id, ingredient id, quantities)
//! 3. Errors are enum variants, never String
//! 4. Each fault kind from the taxonomy is a distinguishable variant

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Integrity Faults
// =============================================================================

/// A single data-integrity fault found while assembling the catalog graph.
///
/// These indicate the catalog-management layer allowed an invalid write:
/// a composition or recipe row referencing something that does not exist,
/// or violating a uniqueness invariant. They are never silently dropped;
/// the builder surfaces the full list so the caller can reject the whole
/// load or quarantine the affected items.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntegrityFault {
    /// A bundle row names an owner that is not in the product set.
    #[error("bundle row owned by unknown item {item_id}")]
    UnknownBundleOwner { item_id: String },

    /// A bundle row names an owner that is not flagged as a bundle.
    #[error("bundle row owned by non-bundle item {item_id}")]
    BundleRowOnSingleItem { item_id: String },

    /// A bundle row names a component that is not in the product set.
    #[error("bundle {bundle_id} references unknown component {component_id}")]
    UnknownBundleComponent {
        bundle_id: String,
        component_id: String,
    },

    /// The same component appears twice in one bundle composition.
    #[error("bundle {bundle_id} lists component {component_id} more than once")]
    DuplicateBundleComponent {
        bundle_id: String,
        component_id: String,
    },

    /// A recipe row names an item that is not in the product set.
    #[error("recipe row owned by unknown item {item_id}")]
    UnknownRecipeOwner { item_id: String },

    /// A recipe row is attached to a bundle (bundles have no recipe).
    #[error("recipe row attached to bundle item {item_id}")]
    RecipeOnBundle { item_id: String },

    /// A recipe row names an ingredient that does not exist.
    #[error("recipe for item {item_id} references unknown ingredient {ingredient_id}")]
    UnknownRecipeIngredient {
        item_id: String,
        ingredient_id: String,
    },

    /// The same ingredient appears twice in one recipe.
    #[error("recipe for item {item_id} lists ingredient {ingredient_id} more than once")]
    DuplicateRecipeLine {
        item_id: String,
        ingredient_id: String,
    },
}

impl IntegrityFault {
    /// The id of the item whose composition/recipe carries the fault.
    ///
    /// Used by the lenient builder to decide which items to quarantine.
    pub fn offending_item(&self) -> &str {
        match self {
            IntegrityFault::UnknownBundleOwner { item_id }
            | IntegrityFault::BundleRowOnSingleItem { item_id }
            | IntegrityFault::UnknownRecipeOwner { item_id }
            | IntegrityFault::RecipeOnBundle { item_id }
            | IntegrityFault::UnknownRecipeIngredient { item_id, .. }
            | IntegrityFault::DuplicateRecipeLine { item_id, .. } => item_id,
            IntegrityFault::UnknownBundleComponent { bundle_id, .. }
            | IntegrityFault::DuplicateBundleComponent { bundle_id, .. } => bundle_id,
        }
    }
}

// =============================================================================
// Catalog Error
// =============================================================================

/// Catalog graph construction failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// One or more composition/recipe rows failed integrity checks.
    ///
    /// ## When This Occurs
    /// - A bundle or recipe row references a missing item/ingredient
    /// - A composition violates a uniqueness invariant
    ///
    /// The full fault list is carried so the catalog-management layer can
    /// report every broken row at once, not just the first one.
    #[error("catalog load rejected: {} integrity fault(s)", faults.len())]
    IntegrityFaults { faults: Vec<IntegrityFault> },
}

// =============================================================================
// Cost Error
// =============================================================================

/// Cost resolution failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CostError {
    /// The requested item is not in the catalog graph.
    #[error("item not found in catalog: {item_id}")]
    UnknownItem { item_id: String },

    /// A bundle component turned out to be a bundle itself.
    ///
    /// ## When This Occurs
    /// Bundles are exactly one level deep; a nested bundle means the
    /// catalog-management layer allowed an invalid write. The resolver
    /// refuses to recurse into it rather than producing a cost that the
    /// settlement planner could never decrement correctly.
    #[error("bundle {bundle_id} has bundle component {component_id}: bundles must be one level deep")]
    NestedBundle {
        bundle_id: String,
        component_id: String,
    },

    /// A recipe line references an ingredient missing from the graph.
    ///
    /// Unreachable after a strict build; kept so resolution degrades to a
    /// typed error instead of a panic if a hand-assembled graph slips in.
    #[error("recipe ingredient not found in catalog: {ingredient_id}")]
    UnknownIngredient { ingredient_id: String },
}

// =============================================================================
// Plan Error
// =============================================================================

/// Checkout-integrity faults raised while planning settlement.
///
/// Planning is all-or-nothing: any fault aborts the whole cart before
/// anything is applied, and the cart is returned to the caller unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// A cart line references an item unknown to the catalog graph.
    #[error("cart line references unknown item {item_id}")]
    UnknownItem { item_id: String },

    /// A bundle in the cart has a component that is itself a bundle.
    #[error("bundle {bundle_id} has bundle component {component_id}: bundles must be one level deep")]
    NestedBundle {
        bundle_id: String,
        component_id: String,
    },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Core Error (umbrella)
// =============================================================================

/// Umbrella over every fault kind the pure engine can raise.
///
/// The store crate wraps this into its own checkout error so callers see
/// one taxonomy end to end.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Data-integrity fault (catalog graph).
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Cost resolution failure.
    #[error(transparent)]
    Cost(#[from] CostError),

    /// Checkout-integrity fault (settlement planning).
    #[error(transparent)]
    Plan(#[from] PlanError),

    /// Validation error.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_messages() {
        let fault = IntegrityFault::UnknownBundleComponent {
            bundle_id: "combo-1".to_string(),
            component_id: "ghost".to_string(),
        };
        assert_eq!(
            fault.to_string(),
            "bundle combo-1 references unknown component ghost"
        );
    }

    #[test]
    fn test_offending_item_points_at_owner() {
        let fault = IntegrityFault::UnknownRecipeIngredient {
            item_id: "bread".to_string(),
            ingredient_id: "ghost-flour".to_string(),
        };
        assert_eq!(fault.offending_item(), "bread");

        let fault = IntegrityFault::DuplicateBundleComponent {
            bundle_id: "combo-1".to_string(),
            component_id: "fries".to_string(),
        };
        assert_eq!(fault.offending_item(), "combo-1");
    }

    #[test]
    fn test_catalog_error_counts_faults() {
        let err = CatalogError::IntegrityFaults {
            faults: vec![
                IntegrityFault::UnknownBundleOwner {
                    item_id: "a".to_string(),
                },
                IntegrityFault::UnknownRecipeOwner {
                    item_id: "b".to_string(),
                },
            ],
        };
        assert_eq!(err.to_string(), "catalog load rejected: 2 integrity fault(s)");
    }

    #[test]
    fn test_plan_error_converts_to_core_error() {
        let plan_err = PlanError::UnknownItem {
            item_id: "ghost".to_string(),
        };
        let core_err: CoreError = plan_err.into();
        assert!(matches!(core_err, CoreError::Plan(_)));
    }
}
