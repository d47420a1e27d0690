//! On-disk record format.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use bookstore_catalog::{Book, BookKind, KindTag};
use bookstore_core::{Isbn, Price};

use super::StoreError;

/// One persisted catalog entry: a kind tag plus its field bundle.
///
/// `fields` stays untyped until the tag is resolved, so a record of an unknown
/// kind can be carried through a read-modify-write cycle untouched. The
/// `type`/`args` aliases read index files written before the current layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    #[serde(alias = "type")]
    pub kind: String,
    #[serde(alias = "args")]
    pub fields: JsonValue,
}

/// Typed view of `StoredRecord::fields`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordFields {
    #[serde(alias = "isbn")]
    pub identifier: String,
    pub title: String,
    pub author: String,
    pub year: i32,
    #[serde(alias = "price", default)]
    pub unit_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u64>,
    #[serde(default, alias = "filetype", skip_serializing_if = "Option::is_none")]
    pub file_format: Option<String>,
    #[serde(default, alias = "format_", skip_serializing_if = "Option::is_none")]
    pub audio_format: Option<String>,
}

impl RecordFields {
    fn from_book(book: &Book) -> Self {
        let mut fields = Self {
            identifier: book.isbn().to_string(),
            title: book.title().to_string(),
            author: book.author().to_string(),
            year: book.year(),
            unit_price: book.price().amount(),
            stock: None,
            file_format: None,
            audio_format: None,
        };
        match book.kind() {
            BookKind::Physical { stock } => fields.stock = Some(*stock),
            BookKind::Digital { file_format } => fields.file_format = Some(file_format.clone()),
            BookKind::Audio { audio_format } => fields.audio_format = Some(audio_format.clone()),
            BookKind::Showcase => {}
        }
        fields
    }
}

impl StoredRecord {
    pub fn from_book(book: &Book) -> Result<Self, StoreError> {
        Ok(Self {
            kind: book.tag().as_str().to_string(),
            fields: serde_json::to_value(RecordFields::from_book(book))?,
        })
    }

    /// Resolved kind, or `None` when the tag is not recognized.
    pub fn tag(&self) -> Option<KindTag> {
        KindTag::parse(&self.kind)
    }

    /// Rebuild the book stored under `key`.
    ///
    /// Returns `Ok(None)` for an unrecognized kind; the caller decides whether
    /// that is acceptable.
    pub fn to_book(&self, key: &str) -> Result<Option<Book>, StoreError> {
        let Some(tag) = self.tag() else {
            return Ok(None);
        };

        let fields: RecordFields = serde_json::from_value(self.fields.clone())
            .map_err(|e| StoreError::malformed(key, e.to_string()))?;
        let isbn = Isbn::new(&fields.identifier).map_err(|e| StoreError::malformed(key, e.to_string()))?;
        // The key must be the identifier exactly as it will be written back.
        if fields.identifier != key || isbn.as_str() != key {
            return Err(StoreError::malformed(
                key,
                format!("identifier {:?} does not match its key", fields.identifier),
            ));
        }
        let price = Price::new(fields.unit_price).map_err(|e| StoreError::malformed(key, e.to_string()))?;

        let kind = match tag {
            KindTag::PhysicalBook => BookKind::Physical {
                stock: required(key, "stock", fields.stock)?,
            },
            KindTag::DigitalBook => BookKind::Digital {
                file_format: required(key, "file_format", fields.file_format)?,
            },
            KindTag::AudioBook => BookKind::Audio {
                audio_format: required(key, "audio_format", fields.audio_format)?,
            },
            KindTag::ShowcaseItem => BookKind::Showcase,
        };
        // Showcase items are never priced, whatever an old file says.
        let price = if tag == KindTag::ShowcaseItem { Price::ZERO } else { price };

        Book::new(isbn, fields.title, fields.author, fields.year, price, kind)
            .map(Some)
            .map_err(|e| StoreError::malformed(key, e.to_string()))
    }
}

fn required<T>(key: &str, field: &str, value: Option<T>) -> Result<T, StoreError> {
    value.ok_or_else(|| StoreError::malformed(key, format!("missing field `{field}`")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn isbn(s: &str) -> Isbn {
        Isbn::new(s).unwrap()
    }

    fn price(amount: f64) -> Price {
        Price::new(amount).unwrap()
    }

    #[test]
    fn physical_record_has_stock_and_common_fields() {
        let book = Book::physical(isbn("978-1"), "Dune", "Frank Herbert", 1965, price(10.0), 5).unwrap();
        let record = StoredRecord::from_book(&book).unwrap();

        assert_eq!(record.kind, "PhysicalBook");
        assert_eq!(
            record.fields,
            json!({
                "identifier": "978-1",
                "title": "Dune",
                "author": "Frank Herbert",
                "year": 1965,
                "unit_price": 10.0,
                "stock": 5
            })
        );
        assert_eq!(record.to_book("978-1").unwrap(), Some(book));
    }

    #[test]
    fn every_kind_survives_a_record_round_trip() {
        let books = vec![
            Book::digital(isbn("2"), "Neuromancer", "Gibson", 1984, price(7.5), "epub").unwrap(),
            Book::audio(isbn("3"), "Hyperion", "Simmons", 1989, price(12.0), "mp3").unwrap(),
            Book::showcase(isbn("4"), "First Folio", "Shakespeare", 1623).unwrap(),
        ];
        for book in books {
            let record = StoredRecord::from_book(&book).unwrap();
            let back = record.to_book(book.isbn().as_str()).unwrap();
            assert_eq!(back.as_ref(), Some(&book));
        }
    }

    #[test]
    fn reads_legacy_layout() {
        let record: StoredRecord = serde_json::from_value(json!({
            "type": "Ebook",
            "args": {
                "isbn": "978-9",
                "title": "Snow Crash",
                "author": "Neal Stephenson",
                "year": 1992,
                "price": 9.99,
                "filetype": "pdf"
            }
        }))
        .unwrap();

        let book = record.to_book("978-9").unwrap().unwrap();
        assert_eq!(book.tag(), KindTag::DigitalBook);
        assert_eq!(
            book.kind(),
            &BookKind::Digital {
                file_format: "pdf".to_string()
            }
        );
        assert_eq!(book.price(), price(9.99));
    }

    #[test]
    fn unknown_kind_yields_none() {
        let record = StoredRecord {
            kind: "Magazine".to_string(),
            fields: json!({ "anything": true }),
        };
        assert_eq!(record.to_book("x").unwrap(), None);
    }

    #[test]
    fn missing_variant_field_is_malformed() {
        let record = StoredRecord {
            kind: "PhysicalBook".to_string(),
            fields: json!({
                "identifier": "978-1",
                "title": "Dune",
                "author": "Frank Herbert",
                "year": 1965,
                "unit_price": 10.0
            }),
        };
        match record.to_book("978-1").unwrap_err() {
            StoreError::Malformed { isbn, reason } => {
                assert_eq!(isbn, "978-1");
                assert!(reason.contains("stock"));
            }
            other => panic!("Expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn key_identifier_mismatch_is_malformed() {
        let book = Book::showcase(isbn("4"), "First Folio", "Shakespeare", 1623).unwrap();
        let record = StoredRecord::from_book(&book).unwrap();
        assert!(matches!(record.to_book("5"), Err(StoreError::Malformed { .. })));
    }

    #[test]
    fn padded_key_is_malformed_rather_than_silently_trimmed() {
        let record: StoredRecord = serde_json::from_value(json!({
            "type": "PaperBook",
            "args": {
                "isbn": " 978-1 ",
                "title": "Dune",
                "author": "Frank Herbert",
                "year": 1965,
                "price": 10.0,
                "stock": 5
            }
        }))
        .unwrap();

        match record.to_book(" 978-1 ").unwrap_err() {
            StoreError::Malformed { isbn, reason } => {
                assert_eq!(isbn, " 978-1 ");
                assert!(reason.contains("does not match its key"));
            }
            other => panic!("Expected Malformed, got {other:?}"),
        }
    }
}
