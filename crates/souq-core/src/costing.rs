//! # Cost Resolver
//!
//! Computes the production cost of any catalog item by recursive
//! composition over the catalog graph.
//!
//! ## Resolution Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        resolve(item)                                    │
//! │                                                                         │
//! │  Bundle            cost = Σ resolve(component) × component.quantity    │
//! │  Single + recipe   cost = Σ ingredient.cost_per_unit × line.quantity   │
//! │  Single, no recipe cost = 0   (resale item, no tracked cost)           │
//! │                                                                         │
//! │  Components are never bundles, so recursion depth is bounded to 2      │
//! │  and cycles cannot occur. The invariant is still asserted at           │
//! │  resolution time: a nested bundle fails, it never silently recurses.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Resolution is a pure function of the current graph: no caching, no
//! mutation. Rebuild the graph after a catalog change and resolved costs
//! follow immediately.

use crate::catalog::CatalogGraph;
use crate::error::CostError;
use crate::money::Money;
use crate::types::{Item, ItemKind, RecipeLine};

// =============================================================================
// Cost Resolver
// =============================================================================

/// Resolves production costs against one catalog graph snapshot.
pub struct CostResolver<'g> {
    graph: &'g CatalogGraph,
}

impl<'g> CostResolver<'g> {
    /// Creates a resolver over the given graph.
    pub fn new(graph: &'g CatalogGraph) -> Self {
        CostResolver { graph }
    }

    /// Resolves the production cost of an item.
    pub fn resolve(&self, item_id: &str) -> Result<Money, CostError> {
        let item = self.graph.item(item_id).ok_or_else(|| CostError::UnknownItem {
            item_id: item_id.to_string(),
        })?;
        self.cost_of(item)
    }

    /// Gross margin of an item: selling price minus production cost.
    ///
    /// Negative margins are legal (loss leaders) and returned as-is.
    pub fn margin(&self, item_id: &str) -> Result<Money, CostError> {
        let item = self.graph.item(item_id).ok_or_else(|| CostError::UnknownItem {
            item_id: item_id.to_string(),
        })?;
        Ok(item.price - self.cost_of(item)?)
    }

    fn cost_of(&self, item: &Item) -> Result<Money, CostError> {
        match &item.kind {
            ItemKind::Bundle { components } => {
                let mut total = Money::ZERO;
                for component in components {
                    let child = self.graph.item(&component.item_id).ok_or_else(|| {
                        CostError::UnknownItem {
                            item_id: component.item_id.clone(),
                        }
                    })?;
                    if child.is_bundle() {
                        return Err(CostError::NestedBundle {
                            bundle_id: item.id.clone(),
                            component_id: child.id.clone(),
                        });
                    }
                    total += self.cost_of(child)?.times(component.quantity);
                }
                Ok(total)
            }
            ItemKind::Single {
                recipe: Some(lines),
                ..
            } => self.recipe_cost(lines),
            ItemKind::Single { recipe: None, .. } => Ok(Money::ZERO),
        }
    }

    fn recipe_cost(&self, lines: &[RecipeLine]) -> Result<Money, CostError> {
        let mut total = Money::ZERO;
        for line in lines {
            let ingredient = self.graph.ingredient(&line.ingredient_id).ok_or_else(|| {
                CostError::UnknownIngredient {
                    ingredient_id: line.ingredient_id.clone(),
                }
            })?;
            total += ingredient.cost_per_unit.times_fractional(line.quantity);
        }
        Ok(total)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
