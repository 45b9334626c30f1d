//! # Domain Types
//!
//! Core domain types used throughout Souq POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Raw store records (what the Catalog Store hands over)                 │
//! │  ┌───────────────┐  ┌────────────┐  ┌──────────────────┐              │
//! │  │ ProductRecord │  │ BundleRow  │  │ IngredientRecord │              │
//! │  │ id, name,     │  │ bundle id, │  │ id, unit,        │              │
//! │  │ price, stock, │  │ component, │  │ cost_per_unit,   │              │
//! │  │ is_bundle     │  │ quantity   │  │ stock, threshold │              │
//! │  └───────────────┘  └────────────┘  └──────────────────┘              │
//! │  ┌────────────┐     ┌────────────────┐                                │
//! │  │ RecipeRow  │     │ CategoryRecord │                                │
//! │  └────────────┘     └────────────────┘                                │
//! │                                                                         │
//! │  Resolved graph types (after the builder joins the records)           │
//! │  ┌──────────────────────────────────┐  ┌────────────┐                 │
//! │  │ Item { kind: Bundle | Single }   │  │ Ingredient │                 │
//! │  └──────────────────────────────────┘  └────────────┘                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A bundle's stock is derived entirely from its components' counters; only
//! single items own an authoritative product stock counter.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Raw Store Records
// =============================================================================

/// A product row as handed over by the Catalog Store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown to cashier and on receipt.
    pub name: String,

    /// Category reference; items without one are simply uncategorized.
    pub category_id: Option<String>,

    /// Selling price (exact decimal, non-negative).
    pub selling_price: Money,

    /// Whether this product is a bundle of other products.
    pub is_bundle: bool,

    /// Current stock level. Not authoritative for bundles.
    pub stock: i64,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

/// One component row of a bundle composition.
///
/// Order is irrelevant; a bundle's composition is a set of
/// (component, quantity) pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleRow {
    /// The bundle product that owns this row.
    pub bundle_item_id: String,

    /// The component product consumed per bundle unit.
    pub component_item_id: String,

    /// Units of the component per bundle unit (integral, ≥ 1).
    pub quantity: i64,
}

/// A raw material row as handed over by the Catalog Store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientRecord {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Unit of measure (e.g. "kg", "l", "pcs").
    pub unit: String,

    /// Cost per unit of measure (exact decimal, non-negative).
    pub cost_per_unit: Money,

    /// Current stock in units of measure. May be fractional.
    pub stock: Decimal,

    /// Stock level below which the ingredient counts as low.
    pub low_stock_threshold: Decimal,

    /// When the ingredient was created.
    pub created_at: DateTime<Utc>,

    /// When the ingredient was last updated.
    pub updated_at: DateTime<Utc>,
}

/// One line of a recipe: the ingredient quantity consumed to produce one
/// unit of the owning item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRow {
    /// The single (non-bundle) item this recipe line belongs to.
    pub item_id: String,

    /// The ingredient consumed.
    pub ingredient_id: String,

    /// Quantity consumed per produced unit (may be fractional, > 0).
    pub quantity: Decimal,
}

/// A category row. Referenced by products for display grouping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub id: String,
    pub name: String,
}

// =============================================================================
// Resolved Graph Types
// =============================================================================

/// A component of a bundle, resolved from [`BundleRow`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleComponent {
    /// The component item. Guaranteed by the builder to exist; guaranteed
    /// by the composition invariant to be a single (non-bundle) item.
    pub item_id: String,

    /// Units consumed per bundle unit.
    pub quantity: i64,
}

/// A recipe line, resolved from [`RecipeRow`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeLine {
    /// The ingredient consumed. Guaranteed by the builder to exist.
    pub ingredient_id: String,

    /// Quantity consumed per produced unit.
    pub quantity: Decimal,
}

/// How an item is composed.
///
/// One tagged variant dispatched by a single recursive cost resolver,
/// instead of ad hoc per-record-type branching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemKind {
    /// A bundle of other items. Its stock is derived entirely from its
    /// components' counters; it has no authoritative counter of its own.
    Bundle { components: Vec<BundleComponent> },

    /// A single item with its own authoritative stock counter, optionally
    /// manufactured from a recipe.
    Single {
        recipe: Option<Vec<RecipeLine>>,
        stock: i64,
    },
}

/// A sellable catalog entry, resolved into the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,

    /// Resolved category name; `None` means uncategorized.
    pub category: Option<String>,

    /// Selling price.
    pub price: Money,

    pub kind: ItemKind,
}

impl Item {
    /// Whether this item is a bundle.
    #[inline]
    pub fn is_bundle(&self) -> bool {
        matches!(self.kind, ItemKind::Bundle { .. })
    }

    /// Recipe lines for a single manufactured item, if any.
    pub fn recipe(&self) -> Option<&[RecipeLine]> {
        match &self.kind {
            ItemKind::Single {
                recipe: Some(lines),
                ..
            } => Some(lines),
            _ => None,
        }
    }

    /// The authoritative product stock counter, if this item owns one.
    pub fn own_stock(&self) -> Option<i64> {
        match self.kind {
            ItemKind::Single { stock, .. } => Some(stock),
            ItemKind::Bundle { .. } => None,
        }
    }
}

/// A raw material, resolved into the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    pub unit: String,
    pub cost_per_unit: Money,
    pub stock: Decimal,
    pub low_stock_threshold: Decimal,
}

impl Ingredient {
    /// Whether the current stock has fallen below the alert threshold.
    ///
    /// Strictly below: stock exactly at the threshold is not yet low.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.stock < self.low_stock_threshold
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a checkout was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Card payment on external terminal.
    Card,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
