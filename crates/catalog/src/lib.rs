//! Catalog domain module.
//!
//! This crate contains the item model and the per-kind purchase rules, implemented
//! as deterministic domain logic (no IO, no storage). A successful purchase
//! returns the notices the caller is expected to deliver.

pub mod book;
pub mod error;
pub mod kind;
pub mod purchase;

pub use book::{Book, BookKind};
pub use error::PurchaseError;
pub use kind::KindTag;
pub use purchase::{Purchase, PurchaseRequest};
