//! Address data access.

use customer_directory_core::{Address, AddressId, CustomerId, MAX_ADDRESS_LINES, NewAddress};

use super::client::{SqlClient, SqlValue, Statement};
use super::completion::{Pending, submit};
use super::mapper::{AddressColumn, Column, map_first, map_rows};
use super::sql::{ClauseSet, Comparison, Select};

const TABLE: &str = "address";

const REQ_ADD_ADDRESS: &str = "INSERT INTO address \
    (line1, line2, line3, line4, line5, line6, zip_code, city, country, customer_id, id) \
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)";

const REQ_DELETE_ADDRESSES: &str = "DELETE FROM address WHERE customer_id = $1";

/// Address DAO.
#[derive(Debug, Clone)]
pub struct AddressDao<C> {
    client: C,
}

impl<C: SqlClient> AddressDao<C> {
    #[must_use]
    pub const fn new(client: C) -> Self {
        Self { client }
    }

    /// Insert `address` for `customer_id` under a freshly generated identifier.
    pub fn register_address(
        &self,
        customer_id: CustomerId,
        address: NewAddress,
    ) -> Pending<AddressId> {
        let id = AddressId::generate();
        let statement = (0..MAX_ADDRESS_LINES)
            .fold(Statement::new(REQ_ADD_ADDRESS), |statement, index| {
                statement.bind(address.line(index).map(str::to_owned))
            })
            .bind(address.zip_code)
            .bind(address.city)
            .bind(address.country)
            .bind(customer_id)
            .bind(id);
        tracing::debug!(customer_id = %customer_id, address_id = %id, "registering address");
        let client = self.client.clone();
        submit(async move {
            client.execute(statement).await?;
            Ok(id)
        })
    }

    /// The address with `id`, or `None`.
    pub fn get_address(&self, id: AddressId) -> Pending<Option<Address>> {
        let client = self.client.clone();
        let statement = select_where(AddressColumn::Id, id);
        submit(async move {
            let rows = client.query(statement).await?;
            Ok(map_first(&rows)?)
        })
    }

    /// Every address of `customer_id`, in store order.
    pub fn list_addresses(&self, customer_id: CustomerId) -> Pending<Vec<Address>> {
        let client = self.client.clone();
        let statement = select_where(AddressColumn::CustomerId, customer_id);
        submit(async move {
            let rows = client.query(statement).await?;
            Ok(map_rows(&rows)?)
        })
    }

    /// Remove every address of `customer_id`.
    pub fn delete_addresses(&self, customer_id: CustomerId) -> Pending<()> {
        let client = self.client.clone();
        let statement = Statement::new(REQ_DELETE_ADDRESSES).bind(customer_id);
        tracing::debug!(customer_id = %customer_id, "deleting addresses");
        submit(async move {
            client.execute(statement).await?;
            Ok(())
        })
    }
}

/// Every address column, for rows whose `column` equals `value`.
fn select_where(column: AddressColumn, value: impl Into<SqlValue>) -> Statement {
    Select::from(TABLE)
        .fields(AddressColumn::NAMES)
        .filter(ClauseSet::new().and(column.name(), Comparison::Equals, Some(value)))
        .build()
}
