//! Infrastructure layer: catalog storage, configuration, and the catalog service.

pub mod catalog_service;
pub mod config;
pub mod store;

pub use catalog_service::{CatalogError, CatalogService, Entries, Listing, ListingEntry, SaleStatus};
pub use config::{CatalogConfig, ConfigError, DuplicatePolicy, UnknownKindPolicy};
pub use store::{
    CatalogRepository, InMemoryRecordStore, JsonFileStore, RecordMap, RecordStore, StoreError,
    StoredRecord,
};
