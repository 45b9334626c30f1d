//! # Store Error Types
//!
//! Error types for the Catalog Store boundary.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  souq-core faults (CatalogError / PlanError / CostError)               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CheckoutError (this module) ← adds settlement-level outcomes          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller decides: out-of-stock message vs. manual reconciliation        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing is silently swallowed and nothing is retried internally: stock
//! insufficiency is not a transient condition worth retrying without user
//! intervention.

use thiserror::Error;

use souq_core::{CatalogError, CostError, PlanError};

use crate::applier::{AppliedDecrement, FailedDecrement};

// =============================================================================
// Store Error
// =============================================================================

/// Store operation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// A counter (or record) the operation targeted does not exist.
    ///
    /// ## When This Occurs
    /// - Decrementing stock for an id the store has never seen
    /// - The catalog changed between planning and applying
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// The store rejected or failed the operation.
    ///
    /// Backend-specific failures (connection loss, timeouts) surface here
    /// for implementations backed by a real database.
    #[error("store operation failed: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Checkout Error
// =============================================================================

/// Settlement failures, spanning the whole checkout taxonomy.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CheckoutError {
    /// Data-integrity fault: the catalog load failed integrity checks.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Checkout-integrity fault: the cart references an unknown item (or a
    /// nested bundle surfaced during planning). Nothing was applied; the
    /// cart is returned to the caller unmodified.
    #[error(transparent)]
    Plan(#[from] PlanError),

    /// Cost resolution failure (composition-invariant violations included).
    #[error(transparent)]
    Cost(#[from] CostError),

    /// Partial-settlement fault: planning succeeded, the sale was
    /// recorded, but one or more leaf decrements hit insufficient stock.
    ///
    /// Already-applied targets are NOT rolled back (the store provides no
    /// compensating transaction); both lists are carried so the caller can
    /// show an out-of-stock message or reconcile manually.
    #[error("partial settlement of sale {sale_id}: {} target(s) applied, {} failed", applied.len(), failed.len())]
    PartialSettlement {
        sale_id: String,
        applied: Vec<AppliedDecrement>,
        failed: Vec<FailedDecrement>,
    },

    /// The store itself failed mid-operation.
    #[error(transparent)]
    Store(#[from] StoreError),
}

// =============================================================================
// Unit Tests
// =============================================================================
