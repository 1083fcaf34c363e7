//! Postal address entity.

use serde::Serialize;

use super::id::{AddressId, CustomerId};

/// Number of free-text line columns an address row carries.
pub const MAX_ADDRESS_LINES: usize = 6;

/// A stored postal address belonging to one customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Address {
    pub id: AddressId,
    #[serde(skip_serializing)]
    pub customer_id: CustomerId,
    /// Non-empty lines only, in column order.
    pub lines: Vec<String>,
    pub zip_code: String,
    pub city: String,
    pub country: String,
}

/// An address that has passed validation and is ready to be registered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewAddress {
    pub lines: Vec<String>,
    pub zip_code: String,
    pub city: String,
    pub country: String,
}

impl NewAddress {
    /// The line stored in column `index`, if any.
    ///
    /// Lines beyond [`MAX_ADDRESS_LINES`] are never stored.
    #[must_use]
    pub fn line(&self, index: usize) -> Option<&str> {
        if index >= MAX_ADDRESS_LINES {
            return None;
        }
        self.lines.get(index).map(String::as_str)
    }
}
