//! `bookstore-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no storage, no console).

pub mod error;
pub mod id;
pub mod price;

pub use error::{DomainError, DomainResult};
pub use id::Isbn;
pub use price::Price;
