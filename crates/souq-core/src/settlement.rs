//! # Checkout Settlement Planner
//!
//! Expands a cart into an aggregated plan of stock decrements against
//! leaf inventory counters.
//!
//! ## Expansion Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    plan(cart, graph)                                    │
//! │                                                                         │
//! │  cart line (item, qty)                                                  │
//! │    │                                                                    │
//! │    ├── bundle        → per component: product stock −= subQty × qty    │
//! │    ├── has recipe    → per line:   ingredient stock −= ingQty × qty    │
//! │    └── plain         → own product stock −= qty                        │
//! │                                                                         │
//! │  Contributions ACCUMULATE: two bundles sharing a component, or two     │
//! │  recipes sharing an ingredient, land on one plan entry per target.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Planning is pure: no writes, no stock-sufficiency checks. Sufficiency
//! is decided at apply time inside the store's atomic primitive, so there
//! is no check-then-act race window here.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::catalog::CatalogGraph;
use crate::error::PlanError;
use crate::types::ItemKind;

// =============================================================================
// Stock Target
// =============================================================================

/// The smallest unit with its own stock counter.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum StockTarget {
    /// A single item's product stock counter.
    Product { item_id: String },
    /// An ingredient's stock counter.
    Ingredient { ingredient_id: String },
}

impl StockTarget {
    /// Convenience constructor for a product target.
    pub fn product(item_id: impl Into<String>) -> Self {
        StockTarget::Product {
            item_id: item_id.into(),
        }
    }

    /// Convenience constructor for an ingredient target.
    pub fn ingredient(ingredient_id: impl Into<String>) -> Self {
        StockTarget::Ingredient {
            ingredient_id: ingredient_id.into(),
        }
    }
}

impl std::fmt::Display for StockTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StockTarget::Product { item_id } => write!(f, "product:{item_id}"),
            StockTarget::Ingredient { ingredient_id } => write!(f, "ingredient:{ingredient_id}"),
        }
    }
}

// =============================================================================
// Decrement Plan
// =============================================================================

/// The aggregated, per-leaf-target quantities to subtract for one checkout.
///
/// Product decrements are integral (units of items); ingredient decrements
/// may be fractional (e.g. kilograms). Keys are unique per target; ordering
/// is deterministic but carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecrementPlan {
    products: BTreeMap<String, i64>,
    ingredients: BTreeMap<String, Decimal>,
}

impl DecrementPlan {
    /// Adds to the product-stock entry for an item.
    pub fn add_product(&mut self, item_id: impl Into<String>, quantity: i64) {
        *self.products.entry(item_id.into()).or_insert(0) += quantity;
    }

    /// Adds to the ingredient-stock entry for an ingredient.
    pub fn add_ingredient(&mut self, ingredient_id: impl Into<String>, quantity: Decimal) {
        *self
            .ingredients
            .entry(ingredient_id.into())
            .or_insert(Decimal::ZERO) += quantity;
    }

    /// Product decrements, ordered by item id.
    pub fn product_decrements(&self) -> impl Iterator<Item = (&str, i64)> {
        self.products.iter().map(|(id, qty)| (id.as_str(), *qty))
    }

    /// Ingredient decrements, ordered by ingredient id.
    pub fn ingredient_decrements(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.ingredients.iter().map(|(id, qty)| (id.as_str(), *qty))
    }

    /// The planned quantity for a single product target, if present.
    pub fn product_quantity(&self, item_id: &str) -> Option<i64> {
        self.products.get(item_id).copied()
    }

    /// The planned quantity for a single ingredient target, if present.
    pub fn ingredient_quantity(&self, ingredient_id: &str) -> Option<Decimal> {
        self.ingredients.get(ingredient_id).copied()
    }

    /// Number of distinct leaf targets.
    pub fn target_count(&self) -> usize {
        self.products.len() + self.ingredients.len()
    }

    /// Whether the plan decrements anything at all.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty() && self.ingredients.is_empty()
    }
}

// =============================================================================
// Planner
// =============================================================================

/// Expands a cart into a [`DecrementPlan`] against the given catalog graph.
///
/// ## Edge Cases
/// - Empty cart → empty plan (a no-op, not an error)
/// - Cart line with an unknown item → [`PlanError::UnknownItem`], aborting
///   the whole cart before anything is applied
/// - Bundle component that is itself a bundle →
///   [`PlanError::NestedBundle`] (defensive composition-invariant check)
///
/// The cart need not be merged: repeated lines for one item aggregate into
/// the same leaf entries either way.
pub fn plan(cart: &Cart, graph: &CatalogGraph) -> Result<DecrementPlan, PlanError> {
    let mut plan = DecrementPlan::default();

    for line in &cart.lines {
        debug_assert!(line.quantity > 0, "cart lines carry positive quantities");

        let item = graph.item(&line.item_id).ok_or_else(|| PlanError::UnknownItem {
            item_id: line.item_id.clone(),
        })?;

        match &item.kind {
            ItemKind::Bundle { components } => {
                for component in components {
                    let child =
                        graph
                            .item(&component.item_id)
                            .ok_or_else(|| PlanError::UnknownItem {
                                item_id: component.item_id.clone(),
                            })?;
                    if child.is_bundle() {
                        return Err(PlanError::NestedBundle {
                            bundle_id: item.id.clone(),
                            component_id: child.id.clone(),
                        });
                    }
                    plan.add_product(&component.item_id, component.quantity * line.quantity);
                }
            }
            ItemKind::Single {
                recipe: Some(lines),
                ..
            } => {
                for recipe_line in lines {
                    plan.add_ingredient(
                        &recipe_line.ingredient_id,
                        recipe_line.quantity * Decimal::from(line.quantity),
                    );
                }
            }
            ItemKind::Single { recipe: None, .. } => {
                plan.add_product(&line.item_id, line.quantity);
            }
        }
    }

    Ok(plan)
}

// =============================================================================
// Unit Tests
// =============================================================================
