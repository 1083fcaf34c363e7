//! Application state shared across handlers.

use std::sync::Arc;

use crate::business::{AddressBusiness, CustomerBusiness, PhoneBusiness};
use crate::db::{AddressDao, CustomerDao, PhoneDao, SqlClient};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Generic over the database client so the
/// router can be driven by an in-memory client in tests.
#[derive(Debug, Clone)]
pub struct AppState<C> {
    inner: Arc<AppStateInner<C>>,
}

#[derive(Debug)]
struct AppStateInner<C> {
    client: C,
    customers: CustomerBusiness<C>,
    addresses: AddressBusiness<C>,
    phones: PhoneBusiness<C>,
}

impl<C: SqlClient> AppState<C> {
    /// Wire the business layer over `client`.
    ///
    /// `maintenance_statements` are `;`-separated statements run after a
    /// bulk customer delete.
    #[must_use]
    pub fn new(client: C, maintenance_statements: &str) -> Self {
        let customers = CustomerBusiness::new(
            CustomerDao::new(client.clone()).with_maintenance_statements(maintenance_statements),
        );
        let addresses = AddressBusiness::new(AddressDao::new(client.clone()), customers.clone());
        let phones = PhoneBusiness::new(PhoneDao::new(client.clone()), customers.clone());

        Self {
            inner: Arc::new(AppStateInner {
                client,
                customers,
                addresses,
                phones,
            }),
        }
    }

    /// Get a reference to the database client.
    #[must_use]
    pub fn client(&self) -> &C {
        &self.inner.client
    }

    #[must_use]
    pub fn customers(&self) -> &CustomerBusiness<C> {
        &self.inner.customers
    }

    #[must_use]
    pub fn addresses(&self) -> &AddressBusiness<C> {
        &self.inner.addresses
    }

    #[must_use]
    pub fn phones(&self) -> &PhoneBusiness<C> {
        &self.inner.phones
    }
}
