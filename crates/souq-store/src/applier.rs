//! # Inventory Decrement Applier
//!
//! Applies a [`DecrementPlan`]: one atomic conditional decrement per leaf
//! target, issued independently against the store.
//!
//! ## Consistency Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Each leaf decrement is atomic on its own counter.                      │
//! │  There is NO cross-target transaction: the store does not offer one.    │
//! │                                                                         │
//! │  plan: { burger: 2, fries: 4, flour: 0.5 }                              │
//! │           │          │           │                                      │
//! │           ▼          ▼           ▼                                      │
//! │        applied    applied    insufficient                               │
//! │                                                                         │
//! │  → partial settlement: applied targets stay applied, the failure is    │
//! │    reported with both lists. No rollback is attempted.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Target order within one checkout carries no meaning; distinct counters
//! have no ordering dependency between them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use souq_core::{DecrementPlan, StockTarget};

use crate::error::StoreResult;
use crate::store::{DecrementOutcome, InventoryStore};

// =============================================================================
// Apply Outcome
// =============================================================================

/// A leaf decrement that was applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedDecrement {
    pub target: StockTarget,
    pub quantity: Decimal,
    /// Counter value after the subtraction.
    pub remaining: Decimal,
}

/// A leaf decrement refused for insufficient stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedDecrement {
    pub target: StockTarget,
    pub requested: Decimal,
    /// Counter value at the time of the attempt (unchanged).
    pub available: Decimal,
}

/// The result of applying a plan: which targets succeeded, which failed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplyOutcome {
    pub applied: Vec<AppliedDecrement>,
    pub failed: Vec<FailedDecrement>,
}

impl ApplyOutcome {
    /// Whether every target in the plan was applied.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

// =============================================================================
// Applier
// =============================================================================

/// Applies every leaf decrement in the plan, independently per target.
///
/// All targets are attempted even after a failure: the caller gets the
/// complete applied/failed picture in one pass, exactly what manual
/// reconciliation needs. A [`crate::error::StoreError`] (e.g. a counter
/// that does not exist) aborts immediately - that is store malfunction,
/// not a settlement outcome.
pub async fn apply<S>(plan: &DecrementPlan, store: &S) -> StoreResult<ApplyOutcome>
where
    S: InventoryStore + ?Sized,
{
    let mut outcome = ApplyOutcome::default();

    for (item_id, quantity) in plan.product_decrements() {
        let target = StockTarget::product(item_id);
        match store.decrement_product_stock(item_id, quantity).await? {
            DecrementOutcome::Applied { remaining } => outcome.applied.push(AppliedDecrement {
                target,
                quantity: Decimal::from(quantity),
                remaining,
            }),
            DecrementOutcome::InsufficientStock { available } => {
                warn!(%target, quantity, %available, "decrement refused: insufficient stock");
                outcome.failed.push(FailedDecrement {
                    target,
                    requested: Decimal::from(quantity),
                    available,
                });
            }
        }
    }

    for (ingredient_id, quantity) in plan.ingredient_decrements() {
        let target = StockTarget::ingredient(ingredient_id);
        match store
            .decrement_ingredient_stock(ingredient_id, quantity)
            .await?
        {
            DecrementOutcome::Applied { remaining } => outcome.applied.push(AppliedDecrement {
                target,
                quantity,
                remaining,
            }),
            DecrementOutcome::InsufficientStock { available } => {
                warn!(%target, %quantity, %available, "decrement refused: insufficient stock");
                outcome.failed.push(FailedDecrement {
                    target,
                    requested: quantity,
                    available,
                });
            }
        }
    }

    Ok(outcome)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use souq_core::catalog::CatalogRecords;
    use souq_core::types::{IngredientRecord, ProductRecord};

    fn store() -> MemoryStore {
        MemoryStore::seeded(CatalogRecords {
            products: vec![
                product("burger", 10),
                product("fries", 10),
            ],
            ingredients: vec![IngredientRecord {
                id: "flour".to_string(),
                name: "Flour".to_string(),
                unit: "kg".to_string(),
                cost_per_unit: "2.00".parse().unwrap(),
                stock: dec!(0.3),
                low_stock_threshold: dec!(10),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            }],
            ..Default::default()
        })
    }

    fn product(id: &str, stock: i64) -> ProductRecord {
        ProductRecord {
            id: id.to_string(),
            name: format!("Product {id}"),
            category_id: None,
            selling_price: "1.00".parse().unwrap(),
            is_bundle: false,
            stock,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_apply_complete() {
        let store = store();
        let mut plan = DecrementPlan::default();
        plan.add_product("burger", 2);
        plan.add_product("fries", 4);

        let outcome = apply(&plan, &store).await.unwrap();
        assert!(outcome.is_complete());
        assert_eq!(outcome.applied.len(), 2);
        assert_eq!(store.product_stock("burger"), Some(8));
        assert_eq!(store.product_stock("fries"), Some(6));
    }

    #[tokio::test]
    async fn test_partial_apply_reports_both_lists_and_keeps_applied() {
        let store = store();
        let mut plan = DecrementPlan::default();
        plan.add_product("burger", 2);
        plan.add_ingredient("flour", dec!(0.5)); // only 0.3 available

        let outcome = apply(&plan, &store).await.unwrap();
        assert!(!outcome.is_complete());

        assert_eq!(outcome.applied.len(), 1);
        assert_eq!(outcome.applied[0].target, StockTarget::product("burger"));

        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(
            outcome.failed[0],
            FailedDecrement {
                target: StockTarget::ingredient("flour"),
                requested: dec!(0.5),
                available: dec!(0.3),
            }
        );

        // No rollback: the applied decrement stays applied, the failed
        // counter is untouched.
        assert_eq!(store.product_stock("burger"), Some(8));
        assert_eq!(store.ingredient_stock("flour"), Some(dec!(0.3)));
    }

    #[tokio::test]
    async fn test_empty_plan_is_a_no_op() {
        let store = store();
        let outcome = apply(&DecrementPlan::default(), &store).await.unwrap();
        assert!(outcome.is_complete());
        assert!(outcome.applied.is_empty());
    }
}
