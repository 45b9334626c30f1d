//! # Store Traits
//!
//! The contract the Catalog Store collaborator must fulfil.
//!
//! ## The Atomic Decrement Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                decrement_*_stock(id, quantity)                          │
//! │                                                                         │
//! │  ❌ WRONG (racy): read counter → check sufficiency → write back        │
//! │     Two checkouts can both pass the check, then both write.            │
//! │                                                                         │
//! │  ✅ CORRECT: one atomic "subtract if result ≥ 0" per counter           │
//! │     The store decides sufficiency inside the same operation that       │
//! │     performs the subtraction. A counter can never go negative.         │
//! │                                                                         │
//! │  Insufficient stock is an OUTCOME, not an error: the counter is left   │
//! │  unchanged and the available quantity is reported back.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stores are injected capabilities: the engine is tested against
//! [`crate::memory::MemoryStore`], and a production implementation wraps
//! whatever database provides the conditional-update primitive.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use souq_core::catalog::CatalogRecords;
use souq_core::{Money, PaymentMethod};

use crate::error::StoreResult;

// =============================================================================
// Decrement Outcome
// =============================================================================

/// Result of one atomic conditional decrement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DecrementOutcome {
    /// The full quantity was subtracted.
    Applied {
        /// Counter value after the subtraction.
        remaining: Decimal,
    },

    /// The counter held less than the requested quantity; it was left
    /// unchanged.
    InsufficientStock {
        /// Counter value at the time of the attempt.
        available: Decimal,
    },
}

impl DecrementOutcome {
    /// Whether the decrement was applied.
    #[inline]
    pub fn is_applied(&self) -> bool {
        matches!(self, DecrementOutcome::Applied { .. })
    }
}

// =============================================================================
// Inventory Store
// =============================================================================

/// The shared inventory counters, behind atomic conditional decrements.
///
/// Each method call is independently atomic per counter; no cross-counter
/// transaction is offered (or assumed anywhere in the engine).
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Atomically subtracts `quantity` from an item's product stock if the
    /// result stays ≥ 0.
    ///
    /// Returns [`DecrementOutcome::InsufficientStock`] (counter unchanged)
    /// otherwise. Errors are reserved for store malfunction, e.g. a
    /// counter that does not exist.
    async fn decrement_product_stock(
        &self,
        item_id: &str,
        quantity: i64,
    ) -> StoreResult<DecrementOutcome>;

    /// Atomically subtracts `quantity` from an ingredient's stock if the
    /// result stays ≥ 0. Quantities may be fractional (e.g. kilograms).
    async fn decrement_ingredient_stock(
        &self,
        ingredient_id: &str,
        quantity: Decimal,
    ) -> StoreResult<DecrementOutcome>;
}

// =============================================================================
// Catalog Store
// =============================================================================

/// Full Catalog Store surface: bulk reads for graph building, sale
/// recording, and the inventory counters.
#[async_trait]
pub trait CatalogStore: InventoryStore {
    /// Reads the raw catalog tables in one shot.
    ///
    /// Stock values in the returned records reflect the counters at read
    /// time; the engine rebuilds its graph from a fresh read on every
    /// operation, so it never serves stale costs.
    async fn load_catalog(&self) -> StoreResult<CatalogRecords>;

    /// Records a completed (or partially settled) sale.
    async fn record_sale(&self, sale: SaleRecord) -> StoreResult<()>;
}

// =============================================================================
// Sale Records
// =============================================================================

/// One line of a recorded sale.
///
/// Uses the snapshot pattern: name and price are frozen at sale time so
/// history survives later catalog edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleLine {
    pub item_id: String,

    /// Item name at time of sale (frozen).
    pub name: String,

    /// Quantity sold.
    pub quantity: i64,

    /// Unit price at time of sale (frozen).
    pub price_at_sale: Money,
}

impl SaleLine {
    /// Line total (price at sale × quantity).
    pub fn line_total(&self) -> Money {
        self.price_at_sale.times(self.quantity)
    }
}

/// A recorded sale transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub id: String,

    /// Grand total (sum of line totals; no tax at this layer).
    pub total: Money,

    pub payment_method: PaymentMethod,

    pub lines: Vec<SaleLine>,

    pub created_at: DateTime<Utc>,
}

/// Helper to generate a new sale ID.
pub fn generate_sale_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_outcome_is_applied() {
        assert!(DecrementOutcome::Applied {
            remaining: dec!(3)
        }
        .is_applied());
        assert!(!DecrementOutcome::InsufficientStock {
            available: dec!(3)
        }
        .is_applied());
    }

    #[test]
    fn test_sale_line_total() {
        let line = SaleLine {
            item_id: "cola".to_string(),
            name: "Cola".to_string(),
            quantity: 3,
            price_at_sale: "1.50".parse().unwrap(),
        };
        assert_eq!(line.line_total(), "4.50".parse().unwrap());
    }

    #[test]
    fn test_generate_sale_id_is_uuid() {
        let id = generate_sale_id();
        assert!(Uuid::parse_str(&id).is_ok());
    }
}
