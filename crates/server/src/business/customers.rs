//! Customer operations.

use customer_directory_core::{Customer, CustomerId, NewCustomer, SearchFilter, parse_storage_date};
use serde::Deserialize;

use super::{BusinessError, parse_id};
use crate::db::{CustomerDao, SqlClient};

/// Customer as submitted by a client; nothing is trusted yet.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CustomerPayload {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// `yyyy-MM-dd`.
    pub birth_date: Option<String>,
    pub email: Option<String>,
}

impl CustomerPayload {
    /// Check that the mandatory fields are all present and well formed.
    ///
    /// # Errors
    ///
    /// Returns [`BusinessError::InvalidParameters`] if first name, last name
    /// or birth date is missing, or the birth date is not `yyyy-MM-dd`.
    pub fn validate(self) -> Result<NewCustomer, BusinessError> {
        let (Some(first_name), Some(last_name), Some(birth_date)) =
            (self.first_name, self.last_name, self.birth_date)
        else {
            return Err(BusinessError::InvalidParameters(
                "Customer first_name, last_name and birth_date have to be set".to_string(),
            ));
        };
        let birth_date = parse_storage_date(&birth_date)
            .map_err(|e| BusinessError::InvalidParameters(e.to_string()))?;
        Ok(NewCustomer {
            first_name,
            last_name,
            birth_date,
            email: self.email,
        })
    }
}

/// Customer business logic.
#[derive(Debug, Clone)]
pub struct CustomerBusiness<C> {
    dao: CustomerDao<C>,
}

impl<C: SqlClient> CustomerBusiness<C> {
    #[must_use]
    pub const fn new(dao: CustomerDao<C>) -> Self {
        Self { dao }
    }

    /// Customers matching every criterion set in `filter`.
    ///
    /// An empty result is a success.
    ///
    /// # Errors
    ///
    /// Returns [`BusinessError::Storage`] if the query fails.
    pub async fn search(&self, filter: &SearchFilter) -> Result<Vec<Customer>, BusinessError> {
        Ok(self.dao.search(filter).await?)
    }

    /// # Errors
    ///
    /// Returns [`BusinessError::InvalidParameters`] for a malformed id and
    /// [`BusinessError::NotFound`] when no customer has it.
    pub async fn get_details(&self, id: &str) -> Result<Customer, BusinessError> {
        let customer_id: CustomerId = parse_id(id)?;
        self.dao
            .get_details(customer_id)
            .await?
            .ok_or_else(|| BusinessError::NotFound(format!("Customer {id} does not exist")))
    }

    /// Validate and insert a customer, returning its new identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BusinessError::InvalidParameters`] for an incomplete payload.
    pub async fn create(&self, payload: CustomerPayload) -> Result<CustomerId, BusinessError> {
        let customer = payload.validate()?;
        Ok(self.dao.create_customer(customer).await?)
    }

    /// # Errors
    ///
    /// Returns [`BusinessError::InvalidParameters`] for a malformed id.
    pub async fn delete(&self, id: &str) -> Result<(), BusinessError> {
        let customer_id: CustomerId = parse_id(id)?;
        Ok(self.dao.delete_customer(customer_id).await?)
    }

    /// Remove every customer; dependent rows go with them.
    ///
    /// # Errors
    ///
    /// Returns [`BusinessError::Storage`] if the bulk delete fails.
    pub async fn delete_all(&self) -> Result<(), BusinessError> {
        Ok(self.dao.delete_all().await?)
    }

    /// Resolves to an error unless `customer_id` exists.
    pub(crate) async fn ensure_exists(&self, customer_id: CustomerId) -> Result<(), BusinessError> {
        if self.dao.customer_exists(customer_id).await? {
            Ok(())
        } else {
            Err(BusinessError::NotFound(format!(
                "Customer {customer_id} does not exist"
            )))
        }
    }
}
