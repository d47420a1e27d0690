use serde::{Deserialize, Serialize};

use bookstore_core::Isbn;

/// Prefix shared by every customer-facing message.
pub const STORE_PREFIX: &str = "Quantum book store";

/// A confirmation or delivery message produced by a catalog operation.
///
/// `ShipTo` and `EmailTo` stand in for the external shipping and mail services;
/// the other variants are confirmations of what was delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "notice", rename_all = "snake_case")]
pub enum Notice {
    ShipTo {
        address: String,
    },
    EmailTo {
        email: String,
    },
    CopiesShipped {
        quantity: u64,
        title: String,
    },
    EbookEmailed {
        title: String,
        email: String,
    },
    AudiobookSent {
        title: String,
        format: String,
        email: String,
    },
    /// Descriptive card for a non-sellable showcase item.
    Showcase {
        title: String,
        author: String,
        year: i32,
        isbn: Isbn,
    },
}

impl Notice {
    /// Stable name for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Notice::ShipTo { .. } => "ship_to",
            Notice::EmailTo { .. } => "email_to",
            Notice::CopiesShipped { .. } => "copies_shipped",
            Notice::EbookEmailed { .. } => "ebook_emailed",
            Notice::AudiobookSent { .. } => "audiobook_sent",
            Notice::Showcase { .. } => "showcase",
        }
    }
}

impl core::fmt::Display for Notice {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Notice::ShipTo { address } => write!(f, "{STORE_PREFIX}: shipping to {address}"),
            Notice::EmailTo { email } => write!(f, "{STORE_PREFIX}: sending email to {email}"),
            Notice::CopiesShipped { quantity, title } => {
                write!(f, "{STORE_PREFIX}: shipping {quantity} copies of {title}")
            }
            Notice::EbookEmailed { title, email } => {
                write!(f, "{STORE_PREFIX}: Emailing EBook {title} to {email}")
            }
            Notice::AudiobookSent { title, format, email } => {
                write!(f, "{STORE_PREFIX}: Sending AudioBook {title} ({format}) to {email}")
            }
            Notice::Showcase { title, author, year, isbn } => {
                writeln!(f, "{STORE_PREFIX}: SHOWCASE")?;
                writeln!(f, "Title: {title}")?;
                writeln!(f, "Author: {author}")?;
                writeln!(f, "Year: {year}")?;
                write!(f, "ISBN: {isbn}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivery_stubs_render_store_messages() {
        let ship = Notice::ShipTo { address: "221B Baker St".to_string() };
        assert_eq!(ship.to_string(), "Quantum book store: shipping to 221B Baker St");

        let mail = Notice::EmailTo { email: "reader@example.com".to_string() };
        assert_eq!(mail.to_string(), "Quantum book store: sending email to reader@example.com");
    }

    #[test]
    fn showcase_card_lists_descriptive_fields() {
        let card = Notice::Showcase {
            title: "First Folio".to_string(),
            author: "William Shakespeare".to_string(),
            year: 1623,
            isbn: Isbn::new("000-1").unwrap(),
        };

        let lines: Vec<String> = card.to_string().lines().map(str::to_string).collect();
        assert_eq!(
            lines,
            vec![
                "Quantum book store: SHOWCASE",
                "Title: First Folio",
                "Author: William Shakespeare",
                "Year: 1623",
                "ISBN: 000-1",
            ]
        );
    }

    #[test]
    fn serializes_with_snake_case_tag() {
        let notice = Notice::CopiesShipped { quantity: 2, title: "Dune".to_string() };
        let json = serde_json::to_value(&notice).unwrap();
        assert_eq!(json["notice"], "copies_shipped");
        assert_eq!(json["quantity"], 2);
        assert_eq!(notice.kind(), "copies_shipped");
    }
}
