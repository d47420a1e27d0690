use bookstore_core::{DomainError, DomainResult, Isbn, Price};
use bookstore_notify::Notice;

use crate::error::PurchaseError;
use crate::kind::KindTag;
use crate::purchase::{Purchase, PurchaseRequest};

/// Largest number of copies of an e-book in a single purchase.
const EBOOK_MAX_PER_PURCHASE: u64 = 1;

/// Kind-specific attributes of a catalog item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookKind {
    Physical { stock: u64 },
    Digital { file_format: String },
    Audio { audio_format: String },
    /// Display-only entry; never priced, never sold.
    Showcase,
}

impl BookKind {
    pub fn tag(&self) -> KindTag {
        match self {
            BookKind::Physical { .. } => KindTag::PhysicalBook,
            BookKind::Digital { .. } => KindTag::DigitalBook,
            BookKind::Audio { .. } => KindTag::AudioBook,
            BookKind::Showcase => KindTag::ShowcaseItem,
        }
    }
}

/// A catalog item, identified by its ISBN.
///
/// Every field is fixed at construction except the stock of a physical book,
/// which only `buy` changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    isbn: Isbn,
    title: String,
    author: String,
    year: i32,
    price: Price,
    kind: BookKind,
}

impl Book {
    /// Build an item of any kind.
    ///
    /// Rejects a blank title, and a showcase item carrying a non-zero price.
    pub fn new(
        isbn: Isbn,
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        price: Price,
        kind: BookKind,
    ) -> DomainResult<Self> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(DomainError::validation("title cannot be empty"));
        }
        if matches!(kind, BookKind::Showcase) && !price.is_zero() {
            return Err(DomainError::validation("showcase items cannot carry a price"));
        }

        Ok(Self {
            isbn,
            title,
            author: author.into(),
            year,
            price,
            kind,
        })
    }

    pub fn physical(
        isbn: Isbn,
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        price: Price,
        stock: u64,
    ) -> DomainResult<Self> {
        Self::new(isbn, title, author, year, price, BookKind::Physical { stock })
    }

    pub fn digital(
        isbn: Isbn,
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        price: Price,
        file_format: impl Into<String>,
    ) -> DomainResult<Self> {
        let kind = BookKind::Digital {
            file_format: file_format.into(),
        };
        Self::new(isbn, title, author, year, price, kind)
    }

    pub fn audio(
        isbn: Isbn,
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        price: Price,
        audio_format: impl Into<String>,
    ) -> DomainResult<Self> {
        let kind = BookKind::Audio {
            audio_format: audio_format.into(),
        };
        Self::new(isbn, title, author, year, price, kind)
    }

    pub fn showcase(
        isbn: Isbn,
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
    ) -> DomainResult<Self> {
        Self::new(isbn, title, author, year, Price::ZERO, BookKind::Showcase)
    }

    pub fn isbn(&self) -> &Isbn {
        &self.isbn
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn kind(&self) -> &BookKind {
        &self.kind
    }

    pub fn tag(&self) -> KindTag {
        self.kind.tag()
    }

    /// Copies on hand; `None` for kinds without stock.
    pub fn stock(&self) -> Option<u64> {
        match self.kind {
            BookKind::Physical { stock } => Some(stock),
            _ => None,
        }
    }

    pub fn is_for_sale(&self) -> bool {
        !matches!(self.kind, BookKind::Showcase)
    }

    /// Display card for a showcase item; `None` for sellable kinds.
    pub fn showcase_card(&self) -> Option<Notice> {
        match self.kind {
            BookKind::Showcase => Some(Notice::Showcase {
                title: self.title.clone(),
                author: self.author.clone(),
                year: self.year,
                isbn: self.isbn.clone(),
            }),
            _ => None,
        }
    }

    /// Apply this kind's purchase rule.
    ///
    /// All checks run before any state changes: on `Err` the book is untouched.
    pub fn buy(&mut self, request: &PurchaseRequest) -> Result<Purchase, PurchaseError> {
        match &mut self.kind {
            BookKind::Physical { stock } => buy_physical(&self.isbn, &self.title, self.price, stock, request),
            BookKind::Digital { .. } => buy_digital(&self.title, self.price, request),
            BookKind::Audio { audio_format } => buy_audio(&self.title, self.price, audio_format, request),
            BookKind::Showcase => Err(PurchaseError::NotForSale {
                title: self.title.clone(),
            }),
        }
    }
}

fn buy_physical(
    isbn: &Isbn,
    title: &str,
    price: Price,
    stock: &mut u64,
    request: &PurchaseRequest,
) -> Result<Purchase, PurchaseError> {
    let requested = positive_quantity(request.quantity)?;
    if requested > *stock {
        return Err(PurchaseError::InsufficientStock {
            isbn: isbn.clone(),
            requested,
            available: *stock,
        });
    }
    let total = total_for(price, requested, request.quantity)?;
    *stock -= requested;

    let mut notices = Vec::with_capacity(2);
    if let Some(address) = request.ship_address() {
        notices.push(Notice::ShipTo {
            address: address.to_string(),
        });
    }
    notices.push(Notice::CopiesShipped {
        quantity: requested,
        title: title.to_string(),
    });

    Ok(Purchase { total, notices })
}

fn buy_digital(title: &str, price: Price, request: &PurchaseRequest) -> Result<Purchase, PurchaseError> {
    let requested = positive_quantity(request.quantity)?;
    if requested > EBOOK_MAX_PER_PURCHASE {
        return Err(PurchaseError::QuantityNotAllowed {
            kind: KindTag::DigitalBook.label(),
            max: EBOOK_MAX_PER_PURCHASE,
            requested: request.quantity,
        });
    }
    let email = request
        .contact_email()
        .ok_or(PurchaseError::ContactRequired {
            kind: KindTag::DigitalBook.label(),
        })?;

    Ok(Purchase {
        total: price,
        notices: vec![
            Notice::EmailTo {
                email: email.to_string(),
            },
            Notice::EbookEmailed {
                title: title.to_string(),
                email: email.to_string(),
            },
        ],
    })
}

fn buy_audio(
    title: &str,
    price: Price,
    audio_format: &str,
    request: &PurchaseRequest,
) -> Result<Purchase, PurchaseError> {
    let requested = positive_quantity(request.quantity)?;
    let email = request
        .contact_email()
        .ok_or(PurchaseError::ContactRequired {
            kind: KindTag::AudioBook.label(),
        })?;

    Ok(Purchase {
        total: total_for(price, requested, request.quantity)?,
        notices: vec![Notice::AudiobookSent {
            title: title.to_string(),
            format: audio_format.to_string(),
            email: email.to_string(),
        }],
    })
}

/// `price * requested`; a total too large to represent is an out-of-range quantity.
fn total_for(price: Price, requested: u64, quantity: i64) -> Result<Price, PurchaseError> {
    price
        .times(requested)
        .map_err(|_| PurchaseError::InvalidQuantity { quantity })
}

fn positive_quantity(quantity: i64) -> Result<u64, PurchaseError> {
    match u64::try_from(quantity) {
        Ok(q) if q > 0 => Ok(q),
        _ => Err(PurchaseError::InvalidQuantity { quantity }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn isbn(s: &str) -> Isbn {
        Isbn::new(s).unwrap()
    }

    fn price(amount: f64) -> Price {
        Price::new(amount).unwrap()
    }

    fn paper(stock: u64) -> Book {
        Book::physical(isbn("978-1"), "Dune", "Frank Herbert", 1965, price(10.0), stock).unwrap()
    }

    fn ebook() -> Book {
        Book::digital(isbn("978-2"), "Neuromancer", "William Gibson", 1984, price(7.5), "epub")
            .unwrap()
    }

    fn audiobook() -> Book {
        Book::audio(isbn("978-3"), "Hyperion", "Dan Simmons", 1989, price(12.0), "mp3").unwrap()
    }

    #[test]
    fn physical_purchase_decrements_stock_and_totals() {
        let mut book = paper(5);
        let purchase = book.buy(&PurchaseRequest::new(3)).unwrap();

        assert_eq!(purchase.total, price(30.0));
        assert_eq!(book.stock(), Some(2));
        assert_eq!(
            purchase.notices,
            vec![Notice::CopiesShipped {
                quantity: 3,
                title: "Dune".to_string()
            }]
        );
    }

    #[test]
    fn physical_purchase_ships_to_address_when_given() {
        let mut book = paper(1);
        let purchase = book
            .buy(&PurchaseRequest::new(1).with_address("1 Main St"))
            .unwrap();

        assert_eq!(
            purchase.notices[0],
            Notice::ShipTo {
                address: "1 Main St".to_string()
            }
        );
        assert_eq!(purchase.notices.len(), 2);
    }

    #[test]
    fn physical_purchase_over_stock_leaves_stock_unchanged() {
        let mut book = paper(2);
        let err = book.buy(&PurchaseRequest::new(3)).unwrap_err();

        assert_eq!(
            err,
            PurchaseError::InsufficientStock {
                isbn: isbn("978-1"),
                requested: 3,
                available: 2
            }
        );
        assert_eq!(book.stock(), Some(2));
    }

    #[test]
    fn physical_purchase_rejects_non_positive_quantity() {
        let mut book = paper(2);
        for quantity in [0, -1, i64::MIN] {
            let err = book.buy(&PurchaseRequest::new(quantity)).unwrap_err();
            assert_eq!(err, PurchaseError::InvalidQuantity { quantity });
        }
        assert_eq!(book.stock(), Some(2));
    }

    #[test]
    fn ebook_single_copy_with_email_returns_unit_price() {
        let mut book = ebook();
        let purchase = book
            .buy(&PurchaseRequest::new(1).with_email("reader@example.com"))
            .unwrap();

        assert_eq!(purchase.total, price(7.5));
        assert_eq!(
            purchase.notices[0],
            Notice::EmailTo {
                email: "reader@example.com".to_string()
            }
        );
    }

    #[test]
    fn ebook_rejects_more_than_one_copy_regardless_of_contact() {
        let mut book = ebook();
        for request in [
            PurchaseRequest::new(2),
            PurchaseRequest::new(2).with_email("reader@example.com"),
        ] {
            match book.buy(&request).unwrap_err() {
                PurchaseError::QuantityNotAllowed { max, requested, .. } => {
                    assert_eq!(max, 1);
                    assert_eq!(requested, 2);
                }
                other => panic!("Expected QuantityNotAllowed, got {other:?}"),
            }
        }
    }

    #[test]
    fn ebook_requires_contact_email() {
        let mut book = ebook();
        let err = book
            .buy(&PurchaseRequest::new(1).with_email("   "))
            .unwrap_err();
        assert_eq!(err, PurchaseError::ContactRequired { kind: "e-book" });

        let err = book.buy(&PurchaseRequest::new(0)).unwrap_err();
        assert_eq!(err, PurchaseError::InvalidQuantity { quantity: 0 });
    }

    #[test]
    fn audiobook_allows_bulk_but_requires_email() {
        let mut book = audiobook();
        let purchase = book
            .buy(&PurchaseRequest::new(2).with_email("listener@example.com"))
            .unwrap();
        assert_eq!(purchase.total, price(24.0));
        assert_eq!(
            purchase.notices,
            vec![Notice::AudiobookSent {
                title: "Hyperion".to_string(),
                format: "mp3".to_string(),
                email: "listener@example.com".to_string(),
            }]
        );

        let err = book.buy(&PurchaseRequest::new(2)).unwrap_err();
        assert_eq!(err, PurchaseError::ContactRequired { kind: "audiobook" });
    }

    #[test]
    fn overflowing_total_is_refused_without_touching_stock() {
        let huge = price(1e308);
        let mut audio = Book::audio(isbn("978-3"), "Hyperion", "Dan Simmons", 1989, huge, "mp3").unwrap();
        let err = audio
            .buy(&PurchaseRequest::new(2).with_email("listener@example.com"))
            .unwrap_err();
        assert_eq!(err, PurchaseError::InvalidQuantity { quantity: 2 });

        let mut paper = Book::physical(isbn("978-1"), "Dune", "Frank Herbert", 1965, huge, 5).unwrap();
        let err = paper.buy(&PurchaseRequest::new(3)).unwrap_err();
        assert_eq!(err, PurchaseError::InvalidQuantity { quantity: 3 });
        assert_eq!(paper.stock(), Some(5));

        let purchase = paper.buy(&PurchaseRequest::new(1)).unwrap();
        assert_eq!(purchase.total, huge);
        assert_eq!(paper.stock(), Some(4));
    }

    #[test]
    fn showcase_is_never_for_sale() {
        let mut book = Book::showcase(isbn("000-1"), "First Folio", "Shakespeare", 1623).unwrap();

        assert!(!book.is_for_sale());
        assert!(book.price().is_zero());
        for quantity in [0, 1, 5] {
            let err = book.buy(&PurchaseRequest::new(quantity)).unwrap_err();
            assert_eq!(
                err,
                PurchaseError::NotForSale {
                    title: "First Folio".to_string()
                }
            );
        }
        assert!(matches!(book.showcase_card(), Some(Notice::Showcase { year: 1623, .. })));
    }

    #[test]
    fn construction_validates_title_and_showcase_price() {
        let err = Book::physical(isbn("1"), "  ", "A", 2000, price(1.0), 1).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = Book::new(isbn("1"), "T", "A", 2000, price(1.0), BookKind::Showcase).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn sellable_kinds_report_for_sale() {
        assert!(paper(0).is_for_sale());
        assert!(ebook().is_for_sale());
        assert!(audiobook().is_for_sale());
        assert_eq!(ebook().showcase_card(), None);
        assert_eq!(audiobook().stock(), None);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: a purchase within stock removes exactly that many copies;
            /// one beyond stock changes nothing.
            #[test]
            fn physical_stock_accounting(stock in 0u64..500, quantity in -5i64..600) {
                let mut book = paper(stock);
                let before = book.clone();

                match book.buy(&PurchaseRequest::new(quantity)) {
                    Ok(purchase) => {
                        prop_assert!(quantity > 0 && quantity as u64 <= stock);
                        prop_assert_eq!(book.stock(), Some(stock - quantity as u64));
                        prop_assert_eq!(purchase.total, price(10.0).times(quantity as u64).unwrap());
                    }
                    Err(_) => {
                        prop_assert!(quantity <= 0 || quantity as u64 > stock);
                        prop_assert_eq!(book, before);
                    }
                }
            }
        }
    }
}
