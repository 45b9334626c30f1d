//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Production costs multiply fractional recipe quantities:                │
//! │    2.00/kg × 0.5kg must be exactly 1.00, across thousands of lines     │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal::Decimal                                    │
//! │    Exact base-10 arithmetic, no drift across many line items           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use souq_core::money::Money;
//!
//! let price: Money = "2.99".parse().unwrap();
//!
//! // Arithmetic operations
//! let line_total = price * 3i64;           // 8.97
//! let with_extra = line_total + "0.03".parse::<Money>().unwrap(); // 9.00
//!
//! // NEVER do this:
//! // let bad = Money::from_f64(2.99); // NO SUCH METHOD EXISTS!
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value as an exact decimal.
///
/// ## Design Decisions
/// - **Signed**: negative values remain representable for margin math
/// - **Single field tuple struct**: zero-cost abstraction over `Decimal`
/// - **Transparent serde**: serializes as the underlying decimal
///
/// Non-negativity of catalog prices and ingredient costs is a validation
/// concern (see [`crate::validation`]), not a property of the type itself.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Zero money value.
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Creates a Money value from an exact decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Returns the underlying decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Multiplies by an integral quantity (bundle components, cart lines).
    #[inline]
    pub fn times(&self, qty: i64) -> Self {
        Money(self.0 * Decimal::from(qty))
    }

    /// Multiplies by a fractional quantity (recipe lines, e.g. 0.5 kg).
    #[inline]
    pub fn times_fractional(&self, qty: Decimal) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display normalizes to two decimal places.
///
/// ## Note
/// This is for receipts and debugging. Currency symbols and localization
/// belong to the surrounding application, not this engine.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Parses from a decimal string, e.g. `"10.50"`.
impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s).map(Money)
    }
}

impl From<Decimal> for Money {
    #[inline]
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integral quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.times(qty)
    }
}

/// Multiplication by fractional quantity.
impl Mul<Decimal> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: Decimal) -> Self {
        self.times_fractional(qty)
    }
}

/// Summation over line items.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
