//! Purchase failure taxonomy.

use thiserror::Error;

use bookstore_core::Isbn;

/// Why a purchase was refused.
///
/// Every variant is recoverable and user-facing. A refused purchase never
/// changes catalog state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PurchaseError {
    /// Non-positive (or otherwise out of range) quantity.
    #[error("you must enter a positive quantity (got {quantity})")]
    InvalidQuantity { quantity: i64 },

    /// Quantity exceeds the per-purchase cap of this kind.
    #[error("{kind} can only be bought {max} at a time (requested {requested})")]
    QuantityNotAllowed {
        kind: &'static str,
        max: u64,
        requested: i64,
    },

    /// Requested quantity exceeds available stock.
    #[error("not enough stock for ISBN {isbn} (requested {requested}, available {available})")]
    InsufficientStock {
        isbn: Isbn,
        requested: u64,
        available: u64,
    },

    /// A delivery e-mail address is required but missing.
    #[error("email required for {kind} delivery")]
    ContactRequired { kind: &'static str },

    /// The item can never be purchased (or a showcase display was requested
    /// with a non-zero quantity).
    #[error("book is not for sale: {title}")]
    NotForSale { title: String },

    /// Identifier absent from the catalog.
    #[error("book with ISBN not found: {isbn}")]
    NotFound { isbn: Isbn },
}

impl PurchaseError {
    /// Stable machine-readable code for logs.
    pub fn code(&self) -> &'static str {
        match self {
            PurchaseError::InvalidQuantity { .. } => "invalid_quantity",
            PurchaseError::QuantityNotAllowed { .. } => "quantity_not_allowed",
            PurchaseError::InsufficientStock { .. } => "insufficient_stock",
            PurchaseError::ContactRequired { .. } => "contact_required",
            PurchaseError::NotForSale { .. } => "not_for_sale",
            PurchaseError::NotFound { .. } => "not_found",
        }
    }
}
