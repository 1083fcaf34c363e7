//! Business rules over the data-access layer.
//!
//! Identifiers arrive as text and are parsed here; a malformed identifier or
//! an incomplete payload is rejected before anything reaches the database.
//! Lookups that find nothing become [`BusinessError::NotFound`].

pub mod addresses;
pub mod customers;
pub mod phones;

pub use addresses::{AddressBusiness, AddressPayload};
pub use customers::{CustomerBusiness, CustomerPayload};
pub use phones::{PhoneBusiness, PhonePayload};

use std::str::FromStr;

use customer_directory_core::IdError;
use thiserror::Error;

use crate::db::DbError;

/// Failure of a business operation.
#[derive(Debug, Error)]
pub enum BusinessError {
    /// Missing, malformed or inconsistent input.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// The addressed entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] DbError),
}

impl From<IdError> for BusinessError {
    fn from(err: IdError) -> Self {
        Self::InvalidParameters(err.to_string())
    }
}

/// Parse a textual identifier into its typed form.
fn parse_id<T>(raw: &str) -> Result<T, BusinessError>
where
    T: FromStr<Err = IdError>,
{
    Ok(raw.parse()?)
}
