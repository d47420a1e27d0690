//! Catalog service (application-level orchestration).
//!
//! Owns the in-memory catalog, keeps the backing store in step with it, and
//! routes purchases:
//!
//! ```text
//! purchase(isbn, request)
//!   ↓
//! 1. Resolve the book (NotFound if absent)
//!   ↓
//! 2. Sellability gate: showcase + quantity 0 → display card, total 0
//!                      any other non-sellable request → NotForSale
//!   ↓
//! 3. Book::buy on a working copy (per-kind rules, no IO)
//!   ↓
//! 4. Persist the updated book (when configured)
//!   ↓
//! 5. Commit the copy, deliver its notices
//! ```
//!
//! A refused or failed purchase leaves both the catalog and the store unchanged
//! and delivers nothing.

use indexmap::IndexMap;
use thiserror::Error;

use bookstore_catalog::{Book, PurchaseError, PurchaseRequest};
use bookstore_core::{Isbn, Price};
use bookstore_notify::Notifier;

use crate::config::{CatalogConfig, DuplicatePolicy};
use crate::store::{CatalogRepository, JsonFileStore, RecordStore, StoreError};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Purchase(#[from] PurchaseError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// Only raised under `DuplicatePolicy::Reject`.
    #[error("a book with ISBN {isbn} is already in the catalog")]
    Duplicate { isbn: Isbn },
}

impl CatalogError {
    pub fn as_purchase(&self) -> Option<&PurchaseError> {
        match self {
            CatalogError::Purchase(err) => Some(err),
            _ => None,
        }
    }
}

/// Listing annotation for one book.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SaleStatus {
    ForSale,
    Showcase,
}

impl SaleStatus {
    pub fn of(book: &Book) -> Self {
        if book.is_for_sale() {
            SaleStatus::ForSale
        } else {
            SaleStatus::Showcase
        }
    }
}

impl core::fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SaleStatus::ForSale => f.write_str("For Sale"),
            SaleStatus::Showcase => f.write_str("Showcase"),
        }
    }
}

/// One line of the catalog listing.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ListingEntry<'a> {
    pub book: &'a Book,
    pub status: SaleStatus,
}

impl core::fmt::Display for ListingEntry<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let book = self.book;
        write!(
            f,
            "- {} by {} ({}) | ISBN: {} | {} | {}",
            book.title(),
            book.author(),
            book.year(),
            book.isbn(),
            book.price(),
            self.status
        )
    }
}

/// Lazy walk over the catalog in insertion order. Clone it to start over.
#[derive(Debug, Clone)]
pub struct Entries<'a> {
    inner: indexmap::map::Values<'a, Isbn, Book>,
}

impl<'a> Iterator for Entries<'a> {
    type Item = ListingEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|book| ListingEntry {
            book,
            status: SaleStatus::of(book),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Entries<'_> {}

/// Result of `CatalogService::list`.
#[derive(Debug, Clone)]
pub enum Listing<'a> {
    /// The catalog holds no books.
    Empty,
    Items(Entries<'a>),
}

/// The bookstore's catalog: identifier → book, plus the store behind it.
#[derive(Debug)]
pub struct CatalogService<S, N> {
    repo: CatalogRepository<S>,
    notifier: N,
    books: IndexMap<Isbn, Book>,
    on_duplicate: DuplicatePolicy,
    persist_purchases: bool,
}

impl<N> CatalogService<JsonFileStore, N>
where
    N: Notifier,
{
    /// Open the catalog stored in `config.data_file`.
    pub fn open_file(config: &CatalogConfig, notifier: N) -> Result<Self, StoreError> {
        Self::open(JsonFileStore::new(config.data_file.clone()), notifier, config)
    }
}

impl<S, N> CatalogService<S, N>
where
    S: RecordStore,
    N: Notifier,
{
    /// Load the catalog from `store`.
    pub fn open(store: S, notifier: N, config: &CatalogConfig) -> Result<Self, StoreError> {
        let repo = CatalogRepository::with_policy(store, config.on_unknown_kind);
        let books = repo.load()?;
        tracing::info!(books = books.len(), "catalog opened");

        Ok(Self {
            repo,
            notifier,
            books,
            on_duplicate: config.on_duplicate,
            persist_purchases: config.persist_purchases,
        })
    }

    pub fn get(&self, isbn: &Isbn) -> Option<&Book> {
        self.books.get(isbn)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Insert `book`, replacing any entry with the same ISBN, and persist it.
    ///
    /// A replaced entry keeps its position in the listing. If persisting fails
    /// the in-memory catalog is left as it was.
    pub fn add(&mut self, book: Book) -> Result<(), CatalogError> {
        let isbn = book.isbn().clone();

        if self.books.contains_key(&isbn) {
            if self.on_duplicate == DuplicatePolicy::Reject {
                return Err(CatalogError::Duplicate { isbn });
            }
            tracing::warn!(isbn = %isbn, "replacing existing catalog entry");
        }

        self.repo.upsert(&book)?;
        tracing::info!(isbn = %isbn, kind = %book.tag(), title = book.title(), "book added");
        self.books.insert(isbn, book);
        Ok(())
    }

    /// Every book with its sale status, or `Listing::Empty`.
    pub fn list(&self) -> Listing<'_> {
        if self.books.is_empty() {
            return Listing::Empty;
        }
        Listing::Items(Entries {
            inner: self.books.values(),
        })
    }

    /// Buy (or, for a showcase item with quantity 0, display) the book `isbn`.
    ///
    /// Returns the total charged. Failures from the book's own rules are
    /// returned unchanged.
    pub fn purchase(&mut self, isbn: &Isbn, request: &PurchaseRequest) -> Result<Price, CatalogError> {
        let book = self.books.get(isbn).ok_or_else(|| PurchaseError::NotFound { isbn: isbn.clone() })?;

        if !book.is_for_sale() {
            return match book.showcase_card() {
                Some(card) if request.quantity == 0 => {
                    tracing::info!(isbn = %isbn, "showcase item displayed");
                    self.notifier.notify(&card);
                    Ok(Price::ZERO)
                }
                _ => Err(PurchaseError::NotForSale {
                    title: book.title().to_string(),
                }
                .into()),
            };
        }

        let mut updated = book.clone();
        let purchase = match updated.buy(request) {
            Ok(purchase) => purchase,
            Err(err) => {
                tracing::info!(isbn = %isbn, reason = err.code(), "purchase refused");
                return Err(err.into());
            }
        };

        if self.persist_purchases && updated != *book {
            self.repo.upsert(&updated)?;
        }
        self.books.insert(isbn.clone(), updated);

        tracing::info!(isbn = %isbn, quantity = request.quantity, total = %purchase.total, "purchase completed");
        self.notifier.notify_all(&purchase.notices);
        Ok(purchase.total)
    }
}
