//! # souq-core: Pure Business Logic for Souq POS
//!
//! This crate is the **heart** of Souq POS. It contains the catalog costing
//! and checkout settlement logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Souq POS Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Catalog Store (external collaborator)           │   │
//! │  │    products ── bundle rows ── ingredients ── recipe rows        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ bulk read                              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                ★ souq-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌────────────┐ │   │
//! │  │   │  catalog  │  │  costing  │  │   cart    │  │ settlement │ │   │
//! │  │   │   graph   │─►│  resolver │  │   lines   │─►│  planner   │ │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └────────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ DecrementPlan                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              souq-store (applier + atomic counters)             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (records, Item, Ingredient, etc.)
//! - [`money`] - Money type backed by exact decimal arithmetic
//! - [`catalog`] - Catalog graph builder with integrity checking
//! - [`costing`] - Recursive production-cost resolver
//! - [`cart`] - Checkout cart with merge-by-item semantics
//! - [`settlement`] - Cart expansion into an aggregated decrement plan
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Decimal Money**: All monetary values are `rust_decimal::Decimal` (no floats!)
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use souq_core::money::Money;
//!
//! // Create money from a decimal string (never from floats!)
//! let price: Money = "10.50".parse().unwrap();
//!
//! let line_total = price * 3i64;
//! assert_eq!(line_total.to_string(), "31.50");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod costing;
pub mod error;
pub mod money;
pub mod settlement;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use souq_core::Money` instead of
// `use souq_core::money::Money`

pub use cart::{Cart, CartLine};
pub use catalog::CatalogGraph;
pub use costing::CostResolver;
pub use error::{CatalogError, CoreError, CostError, IntegrityFault, PlanError, ValidationError};
pub use money::Money;
pub use settlement::{plan, DecrementPlan, StockTarget};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single cart
///
/// ## Business Reason
/// Prevents runaway carts and ensures reasonable transaction sizes.
/// Can be made configurable per-store in future versions.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single line in a cart
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10)
pub const MAX_LINE_QUANTITY: i64 = 999;
