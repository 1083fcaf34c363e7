//! Address operations.

use customer_directory_core::{Address, AddressId, CustomerId, MAX_ADDRESS_LINES, NewAddress};
use serde::Deserialize;

use super::customers::CustomerBusiness;
use super::{BusinessError, parse_id};
use crate::db::{AddressDao, SqlClient};

/// Address as submitted by a client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AddressPayload {
    pub lines: Option<Vec<String>>,
    pub zip_code: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

impl AddressPayload {
    /// # Errors
    ///
    /// Returns [`BusinessError::InvalidParameters`] if ZIP code, city or
    /// country is missing, or there are more lines than an address can hold.
    pub fn validate(self) -> Result<NewAddress, BusinessError> {
        let (Some(zip_code), Some(city), Some(country)) = (self.zip_code, self.city, self.country)
        else {
            return Err(BusinessError::InvalidParameters(
                "Address zip_code, city and country have to be set".to_string(),
            ));
        };
        let lines = self.lines.unwrap_or_default();
        if lines.len() > MAX_ADDRESS_LINES {
            return Err(BusinessError::InvalidParameters(format!(
                "Address cannot have more than {MAX_ADDRESS_LINES} lines"
            )));
        }
        Ok(NewAddress {
            lines,
            zip_code,
            city,
            country,
        })
    }
}

/// Address business logic.
#[derive(Debug, Clone)]
pub struct AddressBusiness<C> {
    dao: AddressDao<C>,
    customers: CustomerBusiness<C>,
}

impl<C: SqlClient> AddressBusiness<C> {
    #[must_use]
    pub const fn new(dao: AddressDao<C>, customers: CustomerBusiness<C>) -> Self {
        Self { dao, customers }
    }

    /// # Errors
    ///
    /// Returns [`BusinessError::InvalidParameters`] for a malformed id.
    pub async fn list(&self, customer_id: &str) -> Result<Vec<Address>, BusinessError> {
        let customer_id: CustomerId = parse_id(customer_id)?;
        Ok(self.dao.list_addresses(customer_id).await?)
    }

    /// The address `address_id`, provided it belongs to `customer_id`.
    ///
    /// # Errors
    ///
    /// Returns [`BusinessError::NotFound`] if there is no such address for
    /// that customer.
    pub async fn get(&self, customer_id: &str, address_id: &str) -> Result<Address, BusinessError> {
        let owner: CustomerId = parse_id(customer_id)?;
        let id: AddressId = parse_id(address_id)?;
        self.dao
            .get_address(id)
            .await?
            .filter(|address| address.customer_id == owner)
            .ok_or_else(|| {
                BusinessError::NotFound(format!("Address {address_id} has not been found"))
            })
    }

    /// # Errors
    ///
    /// Returns [`BusinessError::NotFound`] if the customer does not exist;
    /// nothing is inserted in that case.
    pub async fn register(
        &self,
        customer_id: &str,
        payload: AddressPayload,
    ) -> Result<AddressId, BusinessError> {
        let customer_id: CustomerId = parse_id(customer_id)?;
        let address = payload.validate()?;
        self.customers.ensure_exists(customer_id).await?;
        Ok(self.dao.register_address(customer_id, address).await?)
    }

    /// Remove every address of an existing customer.
    ///
    /// # Errors
    ///
    /// Returns [`BusinessError::NotFound`] if the customer does not exist.
    pub async fn delete_all(&self, customer_id: &str) -> Result<(), BusinessError> {
        let customer_id: CustomerId = parse_id(customer_id)?;
        self.customers.ensure_exists(customer_id).await?;
        Ok(self.dao.delete_addresses(customer_id).await?)
    }
}
