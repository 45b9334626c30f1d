//! # Checkout Service
//!
//! Composes the pure engine (graph build, cost resolution, settlement
//! planning) with the Catalog Store boundary (sale recording, atomic
//! decrements) into the operations the surrounding application calls.
//!
//! ## Settlement Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    settle_checkout(cart, payment)                       │
//! │                                                                         │
//! │  1. empty cart?          → Ok, no-op (nothing recorded, nothing applied)│
//! │  2. load_catalog + build → fresh graph, never a stale cache             │
//! │  3. plan(cart, graph)    → unknown item ABORTS: nothing written,        │
//! │                            cart handed back unmodified                  │
//! │  4. record_sale          → transaction + line snapshots                 │
//! │  5. apply(plan)          → one atomic decrement per leaf target         │
//! │       ├── all applied    → Ok(CheckoutReceipt)                          │
//! │       └── any refused    → Err(PartialSettlement { applied, failed })   │
//! │                            applied targets stay applied                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No locks are held across planning; the store's per-counter primitive is
//! the only mutual exclusion in the whole flow.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use souq_core::cart::Cart;
use souq_core::catalog::CatalogGraph;
use souq_core::costing::CostResolver;
use souq_core::types::Ingredient;
use souq_core::{settlement, Money, PaymentMethod};

use crate::applier::{self, AppliedDecrement};
use crate::error::CheckoutError;
use crate::store::{generate_sale_id, CatalogStore, SaleLine, SaleRecord};

// =============================================================================
// Checkout Receipt
// =============================================================================

/// The outcome of a fully settled checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutReceipt {
    /// Recorded sale id; `None` for the empty-cart no-op.
    pub sale_id: Option<String>,

    /// Grand total charged (sum of line totals).
    pub total: Money,

    /// Every leaf decrement that was applied.
    pub applied: Vec<AppliedDecrement>,
}

// =============================================================================
// Checkout Service
// =============================================================================

/// The engine's application-facing surface over an injected store.
#[derive(Debug)]
pub struct CheckoutService<S> {
    store: Arc<S>,
}

/// Cloning shares the store; it never requires `S: Clone`.
impl<S> Clone for CheckoutService<S> {
    fn clone(&self) -> Self {
        CheckoutService {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: CatalogStore> CheckoutService<S> {
    /// Creates a service over the given store.
    pub fn new(store: Arc<S>) -> Self {
        CheckoutService { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Bulk-reads the catalog and builds a fresh graph.
    ///
    /// Called per operation on purpose: the engine holds no cache across
    /// catalog mutations, so costs and stock views never go stale.
    pub async fn catalog_graph(&self) -> Result<CatalogGraph, CheckoutError> {
        let records = self.store.load_catalog().await?;
        Ok(CatalogGraph::build(records)?)
    }

    /// Resolves the current production cost of an item.
    pub async fn resolve_cost(&self, item_id: &str) -> Result<Money, CheckoutError> {
        let graph = self.catalog_graph().await?;
        Ok(CostResolver::new(&graph).resolve(item_id)?)
    }

    /// Gross margin of an item at current catalog state.
    pub async fn item_margin(&self, item_id: &str) -> Result<Money, CheckoutError> {
        let graph = self.catalog_graph().await?;
        Ok(CostResolver::new(&graph).margin(item_id)?)
    }

    /// Ingredients currently below their low-stock threshold.
    pub async fn low_stock_ingredients(&self) -> Result<Vec<Ingredient>, CheckoutError> {
        let graph = self.catalog_graph().await?;
        Ok(graph
            .low_stock_ingredients()
            .into_iter()
            .cloned()
            .collect())
    }

    /// Settles a checkout: plans the cart, records the sale, applies the
    /// decrements.
    pub async fn settle_checkout(
        &self,
        cart: &Cart,
        payment_method: PaymentMethod,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        if cart.is_empty() {
            debug!("empty cart: settlement is a no-op");
            return Ok(CheckoutReceipt {
                sale_id: None,
                total: Money::ZERO,
                applied: Vec::new(),
            });
        }

        let graph = self.catalog_graph().await?;

        // Normalize duplicate lines before planning; the planner would
        // aggregate them anyway, but the sale record should not carry
        // split lines for one item.
        let cart = cart.merged();
        let plan = settlement::plan(&cart, &graph)?;
        debug!(
            lines = cart.line_count(),
            targets = plan.target_count(),
            "checkout planned"
        );

        let sale = SaleRecord {
            id: generate_sale_id(),
            total: cart.subtotal(),
            payment_method,
            lines: cart
                .lines
                .iter()
                .map(|line| SaleLine {
                    item_id: line.item_id.clone(),
                    name: line.name.clone(),
                    quantity: line.quantity,
                    price_at_sale: line.unit_price,
                })
                .collect(),
            created_at: Utc::now(),
        };
        let sale_id = sale.id.clone();
        let total = sale.total;
        self.store.record_sale(sale).await?;

        let outcome = applier::apply(&plan, self.store.as_ref()).await?;
        if outcome.is_complete() {
            info!(
                %sale_id,
                %total,
                targets = outcome.applied.len(),
                "checkout settled"
            );
            Ok(CheckoutReceipt {
                sale_id: Some(sale_id),
                total,
                applied: outcome.applied,
            })
        } else {
            warn!(
                %sale_id,
                applied = outcome.applied.len(),
                failed = outcome.failed.len(),
                "checkout settled partially"
            );
            Err(CheckoutError::PartialSettlement {
                sale_id,
                applied: outcome.applied,
                failed: outcome.failed,
            })
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
