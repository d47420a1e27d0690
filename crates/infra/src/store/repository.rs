use indexmap::IndexMap;

use bookstore_catalog::Book;
use bookstore_core::Isbn;

use super::{RecordMap, RecordStore, StoreError, StoredRecord};
use crate::config::UnknownKindPolicy;

/// Converts between stored records and books on top of a [`RecordStore`].
#[derive(Debug)]
pub struct CatalogRepository<S> {
    store: S,
    unknown_kinds: UnknownKindPolicy,
}

impl<S> CatalogRepository<S> {
    pub fn new(store: S) -> Self {
        Self::with_policy(store, UnknownKindPolicy::default())
    }

    pub fn with_policy(store: S, unknown_kinds: UnknownKindPolicy) -> Self {
        Self { store, unknown_kinds }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S> CatalogRepository<S>
where
    S: RecordStore,
{
    /// Load the whole catalog, rebuilding each book from its kind tag.
    ///
    /// Records of an unrecognized kind are skipped (with a warning) or rejected,
    /// depending on the policy. A malformed record of a known kind always fails.
    pub fn load(&self) -> Result<IndexMap<Isbn, Book>, StoreError> {
        let records = self.store.read()?;
        let mut books = IndexMap::with_capacity(records.len());

        for (key, record) in &records {
            match record.to_book(key)? {
                Some(book) => {
                    books.insert(book.isbn().clone(), book);
                }
                None => match self.unknown_kinds {
                    UnknownKindPolicy::Skip => {
                        tracing::warn!(isbn = %key, kind = %record.kind, "skipping record of unknown kind");
                    }
                    UnknownKindPolicy::Fail => {
                        return Err(StoreError::UnknownKind {
                            isbn: key.clone(),
                            kind: record.kind.clone(),
                        });
                    }
                },
            }
        }

        tracing::debug!(books = books.len(), skipped = records.len() - books.len(), "catalog loaded");
        Ok(books)
    }

    /// Replace the stored catalog with exactly these books.
    pub fn save<'a, I>(&self, books: I) -> Result<(), StoreError>
    where
        I: IntoIterator<Item = &'a Book>,
    {
        let mut records = RecordMap::new();
        for book in books {
            records.insert(book.isbn().to_string(), StoredRecord::from_book(book)?);
        }
        self.store.write(&records)
    }

    /// Re-read the stored records, insert or replace this book's record, and
    /// rewrite everything. Records this process could not interpret are kept.
    pub fn upsert(&self, book: &Book) -> Result<(), StoreError> {
        let mut records = self.store.read()?;
        records.insert(book.isbn().to_string(), StoredRecord::from_book(book)?);
        self.store.write(&records)
    }
}
