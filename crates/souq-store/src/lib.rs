//! # souq-store: Catalog Store Boundary for Souq POS
//!
//! This crate connects the pure engine in `souq-core` to the Catalog
//! Store collaborator that owns the shared inventory counters.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Souq POS Checkout Flow                           │
//! │                                                                         │
//! │  Cart (souq-core)                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    souq-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌───────────────┐   ┌────────────────┐  │   │
//! │  │   │ CheckoutService│──►│    applier    │──►│ InventoryStore │  │   │
//! │  │   │ plan + record │   │ one atomic    │   │ atomic counter │  │   │
//! │  │   │ + apply       │   │ call/target   │   │ decrements     │  │   │
//! │  │   └───────────────┘   └───────────────┘   └────────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Catalog Store (external: owns counters, sales, catalog tables)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - Store traits: bulk reads, atomic decrements, sale recording
//! - [`memory`] - In-memory store implementing the atomic contract
//! - [`applier`] - Applies a decrement plan, one atomic call per leaf target
//! - [`checkout`] - Checkout service composing plan + record + apply
//! - [`error`] - Store and checkout error types
//!
//! ## Consistency Model
//!
//! Each counter decrement is atomic on its own; there is no cross-target
//! transaction. A checkout that fails partway is reported as a partial
//! settlement with the full applied/failed picture and is never rolled
//! back automatically.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod applier;
pub mod checkout;
pub mod error;
pub mod memory;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use applier::{apply, AppliedDecrement, ApplyOutcome, FailedDecrement};
pub use checkout::{CheckoutReceipt, CheckoutService};
pub use error::{CheckoutError, StoreError, StoreResult};
pub use memory::MemoryStore;
pub use store::{
    generate_sale_id, CatalogStore, DecrementOutcome, InventoryStore, SaleLine, SaleRecord,
};
