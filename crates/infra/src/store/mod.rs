//! Catalog persistence boundary.
//!
//! The catalog is stored as one JSON object mapping each identifier to a tagged
//! record. [`RecordStore`] backends only move raw records in and out;
//! [`CatalogRepository`] turns records into books and back.

pub mod in_memory;
pub mod json_file;
pub mod record;
pub mod repository;

use std::path::PathBuf;
use std::sync::Arc;

use indexmap::IndexMap;
use thiserror::Error;

pub use in_memory::InMemoryRecordStore;
pub use json_file::JsonFileStore;
pub use record::{RecordFields, StoredRecord};
pub use repository::CatalogRepository;

/// Raw catalog contents, identifier → record, in file order.
pub type RecordMap = IndexMap<String, StoredRecord>;

/// Catalog storage error.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to {action} catalog file {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog file {} is not valid JSON: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode catalog record: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("malformed record {isbn}: {reason}")]
    Malformed { isbn: String, reason: String },

    /// Only raised under the strict unknown-kind policy.
    #[error("record {isbn} has unknown kind {kind:?}")]
    UnknownKind { isbn: String, kind: String },

    #[error("catalog store lock poisoned")]
    Poisoned,
}

impl StoreError {
    pub fn malformed(isbn: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            isbn: isbn.into(),
            reason: reason.into(),
        }
    }
}

/// Whole-catalog record storage.
///
/// `write` replaces everything previously stored; there is no incremental update.
pub trait RecordStore: Send + Sync {
    fn read(&self) -> Result<RecordMap, StoreError>;
    fn write(&self, records: &RecordMap) -> Result<(), StoreError>;
}

impl<S> RecordStore for Arc<S>
where
    S: RecordStore + ?Sized,
{
    fn read(&self) -> Result<RecordMap, StoreError> {
        (**self).read()
    }

    fn write(&self, records: &RecordMap) -> Result<(), StoreError> {
        (**self).write(records)
    }
}
