use bookstore_core::Price;
use bookstore_notify::Notice;

/// Input of a purchase: how many copies and where to deliver them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PurchaseRequest {
    pub quantity: i64,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl PurchaseRequest {
    pub fn new(quantity: i64) -> Self {
        Self {
            quantity,
            email: None,
            address: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Contact e-mail, treating a blank string as absent.
    pub fn contact_email(&self) -> Option<&str> {
        non_blank(self.email.as_deref())
    }

    /// Shipping address, treating a blank string as absent.
    pub fn ship_address(&self) -> Option<&str> {
        non_blank(self.address.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Outcome of an accepted purchase.
#[derive(Debug, Clone, PartialEq)]
pub struct Purchase {
    pub total: Price,
    /// Messages to deliver, in order.
    pub notices: Vec<Notice>,
}
