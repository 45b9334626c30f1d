//! # In-Memory Catalog Store
//!
//! An in-memory [`CatalogStore`] that simulates the external store's
//! atomic contract.
//!
//! ## Thread Safety
//! Counters live behind `Mutex`es; each conditional decrement is one
//! critical section, so "check and subtract" can never interleave with a
//! competing checkout:
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Checkout A: lock ── read 5 ── 5 ≥ 3 ── write 2 ── unlock              │
//! │  Checkout B:                                         lock ── read 2 ──  │
//! │                                                      2 < 3 ── unlock   │
//! │                                                                         │
//! │  Combined demand 6 > stock 5: exactly one succeeds.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No `.await` happens while a lock is held.
//!
//! This is both the test double for the whole engine and the reference
//! semantics any production store implementation must match.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::debug;

use souq_core::catalog::CatalogRecords;

use crate::error::{StoreError, StoreResult};
use crate::store::{CatalogStore, DecrementOutcome, InventoryStore, SaleRecord};

// =============================================================================
// Memory Store
// =============================================================================

/// In-memory Catalog Store with atomic per-counter decrements.
#[derive(Debug, Default)]
pub struct MemoryStore {
    catalog: Mutex<CatalogRecords>,
    product_stock: Mutex<HashMap<String, i64>>,
    ingredient_stock: Mutex<HashMap<String, Decimal>>,
    sales: Mutex<Vec<SaleRecord>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Creates a store seeded with catalog records; counters are
    /// initialized from the records' stock values. Bundles own no counter.
    pub fn seeded(records: CatalogRecords) -> Self {
        let store = MemoryStore::new();
        store.replace_catalog(records);
        store
    }

    /// Replaces the whole catalog and re-seeds every counter from it.
    ///
    /// Stands in for the catalog-management operations that are external
    /// to this engine; the next `load_catalog` sees the new state.
    pub fn replace_catalog(&self, records: CatalogRecords) {
        let product_stock: HashMap<String, i64> = records
            .products
            .iter()
            .filter(|p| !p.is_bundle)
            .map(|p| (p.id.clone(), p.stock))
            .collect();
        let ingredient_stock: HashMap<String, Decimal> = records
            .ingredients
            .iter()
            .map(|i| (i.id.clone(), i.stock))
            .collect();

        *self.product_stock.lock().expect("product stock mutex poisoned") = product_stock;
        *self
            .ingredient_stock
            .lock()
            .expect("ingredient stock mutex poisoned") = ingredient_stock;
        *self.catalog.lock().expect("catalog mutex poisoned") = records;
    }

    /// Current product stock counter, if the item owns one.
    pub fn product_stock(&self, item_id: &str) -> Option<i64> {
        self.product_stock
            .lock()
            .expect("product stock mutex poisoned")
            .get(item_id)
            .copied()
    }

    /// Current ingredient stock counter, if present.
    pub fn ingredient_stock(&self, ingredient_id: &str) -> Option<Decimal> {
        self.ingredient_stock
            .lock()
            .expect("ingredient stock mutex poisoned")
            .get(ingredient_id)
            .copied()
    }

    /// Snapshot of all recorded sales, oldest first.
    pub fn sales(&self) -> Vec<SaleRecord> {
        self.sales.lock().expect("sales mutex poisoned").clone()
    }
}

#[async_trait]
impl InventoryStore for MemoryStore {
    async fn decrement_product_stock(
        &self,
        item_id: &str,
        quantity: i64,
    ) -> StoreResult<DecrementOutcome> {
        // One critical section: sufficiency check and subtraction cannot
        // interleave with a competing checkout.
        let mut stocks = self.product_stock.lock().expect("product stock mutex poisoned");
        let stock = stocks
            .get_mut(item_id)
            .ok_or_else(|| StoreError::not_found("Product counter", item_id))?;

        if *stock >= quantity {
            *stock -= quantity;
            let remaining = *stock;
            debug!(item_id, quantity, remaining, "product stock decremented");
            Ok(DecrementOutcome::Applied {
                remaining: Decimal::from(remaining),
            })
        } else {
            debug!(item_id, quantity, available = *stock, "product stock insufficient");
            Ok(DecrementOutcome::InsufficientStock {
                available: Decimal::from(*stock),
            })
        }
    }

    async fn decrement_ingredient_stock(
        &self,
        ingredient_id: &str,
        quantity: Decimal,
    ) -> StoreResult<DecrementOutcome> {
        let mut stocks = self
            .ingredient_stock
            .lock()
            .expect("ingredient stock mutex poisoned");
        let stock = stocks
            .get_mut(ingredient_id)
            .ok_or_else(|| StoreError::not_found("Ingredient counter", ingredient_id))?;

        if *stock >= quantity {
            *stock -= quantity;
            let remaining = *stock;
            debug!(ingredient_id, %quantity, %remaining, "ingredient stock decremented");
            Ok(DecrementOutcome::Applied { remaining })
        } else {
            debug!(ingredient_id, %quantity, available = %*stock, "ingredient stock insufficient");
            Ok(DecrementOutcome::InsufficientStock { available: *stock })
        }
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn load_catalog(&self) -> StoreResult<CatalogRecords> {
        let mut records = self.catalog.lock().expect("catalog mutex poisoned").clone();

        // Overlay live counter values so the caller's graph sees current
        // stock, not the seed values.
        {
            let stocks = self.product_stock.lock().expect("product stock mutex poisoned");
            for product in &mut records.products {
                if let Some(stock) = stocks.get(&product.id) {
                    product.stock = *stock;
                }
            }
        }
        {
            let stocks = self
                .ingredient_stock
                .lock()
                .expect("ingredient stock mutex poisoned");
            for ingredient in &mut records.ingredients {
                if let Some(stock) = stocks.get(&ingredient.id) {
                    ingredient.stock = *stock;
                }
            }
        }

        Ok(records)
    }

    async fn record_sale(&self, sale: SaleRecord) -> StoreResult<()> {
        debug!(sale_id = %sale.id, total = %sale.total, lines = sale.lines.len(), "sale recorded");
        self.sales.lock().expect("sales mutex poisoned").push(sale);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
