//! Unit price value object.

use crate::error::{DomainError, DomainResult};

/// Non-negative, finite monetary amount in the store's single currency.
///
/// Value object: compared by amount, never mutated in place.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default)]
pub struct Price(f64);

impl Price {
    pub const ZERO: Price = Price(0.0);

    pub fn new(amount: f64) -> DomainResult<Self> {
        if !amount.is_finite() {
            return Err(DomainError::validation("price must be a finite number"));
        }
        if amount < 0.0 {
            return Err(DomainError::validation("price cannot be negative"));
        }
        Ok(Self(amount))
    }

    pub fn amount(self) -> f64 {
        self.0
    }

    /// Total for `quantity` units.
    ///
    /// Fails when the product is not a representable amount.
    pub fn times(self, quantity: u64) -> DomainResult<Price> {
        Price::new(self.0 * quantity as f64)
            .map_err(|_| DomainError::validation(format!("total for {quantity} units is out of range")))
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}
