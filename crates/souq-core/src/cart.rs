//! # Checkout Cart
//!
//! The ephemeral cart a checkout settles. Lives for one transaction:
//! created, planned, applied, discarded.
//!
//! ## Invariants
//! - Lines are unique by `item_id` (adding the same item merges quantity)
//! - Quantity must be > 0 (updating to 0 removes the line)
//! - Maximum lines: [`crate::MAX_CART_LINES`]
//! - Maximum quantity per line: [`crate::MAX_LINE_QUANTITY`]
//!
//! The settlement planner aggregates by leaf target regardless, so a cart
//! with duplicate lines still settles correctly; the merge discipline here
//! exists for clarity, not correctness.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Item;
use crate::{MAX_CART_LINES, MAX_LINE_QUANTITY};

// =============================================================================
// Cart Line
// =============================================================================

/// One line of a cart: an item reference plus quantity.
///
/// ## Price Freezing
/// Name and unit price are captured when the line is added. If the catalog
/// changes afterwards, the cart keeps displaying (and the sale records)
/// what the customer was quoted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Item ID (UUID).
    pub item_id: String,

    /// Item name at time of adding (frozen).
    pub name: String,

    /// Unit price at time of adding (frozen).
    pub unit_price: Money,

    /// Quantity in cart.
    pub quantity: i64,
}

impl CartLine {
    /// Creates a cart line from a catalog item and quantity.
    pub fn from_item(item: &Item, quantity: i64) -> Self {
        CartLine {
            item_id: item.id.clone(),
            name: item.name.clone(),
            unit_price: item.price,
            quantity,
        }
    }

    /// Line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.unit_price.times(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The checkout cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    /// Lines in the cart.
    pub lines: Vec<CartLine>,

    /// When the cart was created/last cleared.
    pub created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            lines: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds an item to the cart or increases quantity if already present.
    pub fn add_item(&mut self, item: &Item, quantity: i64) -> Result<(), ValidationError> {
        if quantity <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            });
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == item.id) {
            let new_qty = line.quantity + quantity;
            if new_qty > MAX_LINE_QUANTITY {
                return Err(ValidationError::OutOfRange {
                    field: "quantity".to_string(),
                    min: 1,
                    max: MAX_LINE_QUANTITY,
                });
            }
            line.quantity = new_qty;
            return Ok(());
        }

        if quantity > MAX_LINE_QUANTITY {
            return Err(ValidationError::OutOfRange {
                field: "quantity".to_string(),
                min: 1,
                max: MAX_LINE_QUANTITY,
            });
        }

        if self.lines.len() >= MAX_CART_LINES {
            return Err(ValidationError::OutOfRange {
                field: "cart lines".to_string(),
                min: 0,
                max: MAX_CART_LINES as i64,
            });
        }

        self.lines.push(CartLine::from_item(item, quantity));
        Ok(())
    }

    /// Sets the quantity of a line; a quantity of 0 or less removes it.
    pub fn update_quantity(&mut self, item_id: &str, quantity: i64) -> Result<(), ValidationError> {
        if quantity <= 0 {
            return self.remove_line(item_id);
        }

        if quantity > MAX_LINE_QUANTITY {
            return Err(ValidationError::OutOfRange {
                field: "quantity".to_string(),
                min: 1,
                max: MAX_LINE_QUANTITY,
            });
        }

        let line = self
            .lines
            .iter_mut()
            .find(|l| l.item_id == item_id)
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "item_id".to_string(),
                reason: format!("item {item_id} not in cart"),
            })?;
        line.quantity = quantity;
        Ok(())
    }

    /// Removes a line by item ID.
    pub fn remove_line(&mut self, item_id: &str) -> Result<(), ValidationError> {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.item_id != item_id);

        if self.lines.len() == initial_len {
            Err(ValidationError::InvalidFormat {
                field: "item_id".to_string(),
                reason: format!("item {item_id} not in cart"),
            })
        } else {
            Ok(())
        }
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.created_at = Utc::now();
    }

    /// Returns a copy with duplicate lines for one item merged (quantities
    /// summed, first occurrence wins for the frozen name/price).
    ///
    /// Carts built through [`Cart::add_item`] are already merged; this
    /// normalizes carts assembled elsewhere before planning.
    pub fn merged(&self) -> Cart {
        let mut merged: Vec<CartLine> = Vec::with_capacity(self.lines.len());
        for line in &self.lines {
            match merged.iter_mut().find(|l| l.item_id == line.item_id) {
                Some(existing) => existing.quantity += line.quantity,
                None => merged.push(line.clone()),
            }
        }
        Cart {
            lines: merged,
            created_at: self.created_at,
        }
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Cart subtotal (sum of line totals). No tax is applied here.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
