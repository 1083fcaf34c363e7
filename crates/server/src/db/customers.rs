//! Customer data access.
//!
//! Every method submits its statement and returns a [`Pending`] at once; the
//! outcome arrives through it exactly once.

use std::sync::Arc;

use customer_directory_core::{Customer, CustomerId, NewCustomer, SearchFilter};

use super::client::{SqlClient, Statement};
use super::completion::{Pending, submit};
use super::mapper::{Column, CustomerColumn, map_first, map_rows};
use super::sql::{ClauseSet, Comparison, Select};

const TABLE: &str = "customer";

const REQ_CUSTOMER_EXISTS: &str = "SELECT 1 FROM customer WHERE id = $1";

const REQ_ADD_CUSTOMER: &str = "INSERT INTO customer \
    (id, first_name, last_name, birth_date, email) VALUES ($1, $2, $3, $4, $5)";

const REQ_DELETE: &str = "DELETE FROM customer WHERE id = $1";

const REQ_DELETE_ALL: &str = "DELETE FROM customer";

/// Customer DAO.
#[derive(Debug, Clone)]
pub struct CustomerDao<C> {
    client: C,
    maintenance: Arc<[String]>,
}

impl<C: SqlClient> CustomerDao<C> {
    #[must_use]
    pub fn new(client: C) -> Self {
        Self {
            client,
            maintenance: Arc::from(Vec::new()),
        }
    }

    /// Statements to run after [`Self::delete_all`], separated by `;`.
    ///
    /// Blank entries are ignored.
    #[must_use]
    pub fn with_maintenance_statements(mut self, statements: &str) -> Self {
        self.maintenance = statements
            .split(';')
            .map(str::trim)
            .filter(|statement| !statement.is_empty())
            .map(str::to_owned)
            .collect();
        self
    }

    /// Resolves to `true` iff a customer with `id` exists.
    pub fn customer_exists(&self, id: CustomerId) -> Pending<bool> {
        let client = self.client.clone();
        let statement = Statement::new(REQ_CUSTOMER_EXISTS).bind(id);
        tracing::debug!(customer_id = %id, "checking customer existence");
        submit(async move {
            let rows = client.query(statement).await?;
            Ok(!rows.is_empty())
        })
    }

    /// Customers matching every criterion set in `filter`, in store order.
    ///
    /// An empty result is a successful outcome.
    pub fn search(&self, filter: &SearchFilter) -> Pending<Vec<Customer>> {
        let statement = search_statement(filter);
        tracing::debug!(
            sql = %statement.sql,
            params = statement.params.len(),
            "searching customers"
        );
        let client = self.client.clone();
        submit(async move {
            let rows = client.query(statement).await?;
            Ok(map_rows(&rows)?)
        })
    }

    /// The customer with `id`, or `None` when the store returns no row.
    pub fn get_details(&self, id: CustomerId) -> Pending<Option<Customer>> {
        let client = self.client.clone();
        let statement = details_statement(id);
        submit(async move {
            let rows = client.query(statement).await?;
            Ok(map_first(&rows)?)
        })
    }

    /// Insert a customer under a freshly generated identifier.
    ///
    /// The identifier is returned on success whatever the affected-row count.
    pub fn create_customer(&self, customer: NewCustomer) -> Pending<CustomerId> {
        let id = CustomerId::generate();
        let statement = Statement::new(REQ_ADD_CUSTOMER)
            .bind(id)
            .bind(customer.first_name)
            .bind(customer.last_name)
            .bind(customer.birth_date)
            .bind(customer.email);
        tracing::debug!(customer_id = %id, "creating customer");
        let client = self.client.clone();
        submit(async move {
            client.execute(statement).await?;
            Ok(id)
        })
    }

    pub fn delete_customer(&self, id: CustomerId) -> Pending<()> {
        let client = self.client.clone();
        let statement = Statement::new(REQ_DELETE).bind(id);
        tracing::debug!(customer_id = %id, "deleting customer");
        submit(async move {
            client.execute(statement).await?;
            Ok(())
        })
    }

    /// Delete every customer, then fire the maintenance statements.
    ///
    /// Maintenance statements run concurrently and independently once the
    /// delete has succeeded; their failures are logged and never reach the
    /// returned outcome.
    pub fn delete_all(&self) -> Pending<()> {
        let client = self.client.clone();
        let maintenance = Arc::clone(&self.maintenance);
        submit(async move {
            if let Err(e) = client.execute(Statement::new(REQ_DELETE_ALL)).await {
                tracing::error!(error = %e, "Unable to clear database");
                return Err(e);
            }
            for sql in maintenance.iter().cloned() {
                let client = client.clone();
                tokio::spawn(async move {
                    if let Err(e) = client.execute(Statement::new(sql.as_str())).await {
                        tracing::error!(
                            error = %e,
                            statement = %sql,
                            "Maintenance statement failed"
                        );
                    }
                });
            }
            Ok(())
        })
    }
}

fn details_statement(id: CustomerId) -> Statement {
    Select::from(TABLE)
        .fields(CustomerColumn::NAMES)
        .filter(ClauseSet::new().and(CustomerColumn::Id.name(), Comparison::Equals, Some(id)))
        .build()
}

fn search_statement(filter: &SearchFilter) -> Statement {
    use CustomerColumn as C;
    Select::from(TABLE)
        .fields(C::NAMES)
        .filter(
            ClauseSet::new()
                .contains(C::FirstName.name(), filter.first_name.as_deref())
                .contains(C::LastName.name(), filter.last_name.as_deref())
                .and(C::Email.name(), Comparison::Equals, filter.email.clone())
                .and(C::BirthDate.name(), Comparison::Equals, filter.birth_date)
                .and(C::BirthDate.name(), Comparison::GreaterOrEqual, filter.born_after)
                .and(C::BirthDate.name(), Comparison::LessOrEqual, filter.born_before),
        )
        .build()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::db::mock::{MockClient, MockResponse};
    use crate::db::{DbError, Row, SqlValue};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn customer_row(id: CustomerId, first_name: &str, last_name: &str) -> Row {
        Row::new(vec![
            SqlValue::Uuid(id.as_uuid()),
            SqlValue::from(first_name),
            SqlValue::from(last_name),
            SqlValue::from("1980-05-17"),
            SqlValue::Null,
        ])
    }

    #[test]
    fn test_details_statement_selects_mapper_columns_by_id() {
        let id = CustomerId::generate();
        let statement = details_statement(id);
        assert_eq!(
            statement.sql,
            "SELECT id, first_name, last_name, birth_date, email FROM customer WHERE id = $1"
        );
        assert_eq!(statement.params, vec![SqlValue::Uuid(id.as_uuid())]);
    }

    #[test]
    fn test_empty_filter_has_no_where() {
        let statement = search_statement(&SearchFilter::default());
        assert_eq!(
            statement.sql,
            "SELECT id, first_name, last_name, birth_date, email FROM customer"
        );
        assert!(statement.params.is_empty());
    }

    #[test]
    fn test_full_filter_binds_in_declaration_order() {
        let filter = SearchFilter {
            first_name: Some("Jo".to_string()),
            last_name: Some("Do".to_string()),
            email: Some("jo@doe.io".to_string()),
            birth_date: Some(date(1980, 5, 17)),
            born_after: Some(date(1970, 1, 1)),
            born_before: Some(date(1990, 12, 31)),
        };
        let statement = search_statement(&filter);
        assert!(statement.sql.ends_with(
            "WHERE first_name LIKE $1 AND last_name LIKE $2 AND email = $3 \
             AND birth_date = $4 AND birth_date >= $5 AND birth_date <= $6"
        ));
        assert_eq!(
            statement.params,
            vec![
                SqlValue::from("%Jo%"),
                SqlValue::from("%Do%"),
                SqlValue::from("jo@doe.io"),
                SqlValue::Date(date(1980, 5, 17)),
                SqlValue::Date(date(1970, 1, 1)),
                SqlValue::Date(date(1990, 12, 31)),
            ]
        );
    }

    #[test]
    fn test_bound_count_matches_present_criteria() {
        for mask in 0u8..64 {
            let bit = |n: u8| mask & (1 << n) != 0;
            let filter = SearchFilter {
                first_name: bit(0).then(|| "a".to_string()),
                last_name: bit(1).then(|| "b".to_string()),
                email: bit(2).then(|| "c".to_string()),
                birth_date: bit(3).then(|| date(2000, 1, 1)),
                born_after: bit(4).then(|| date(2000, 1, 1)),
                born_before: bit(5).then(|| date(2000, 1, 1)),
            };
            let statement = search_statement(&filter);
            assert_eq!(statement.params.len(), filter.criteria_count());
            assert_eq!(statement.sql.contains("WHERE"), !filter.is_empty());
            assert_eq!(search_statement(&filter), statement);
        }
    }

    #[tokio::test]
    async fn test_search_returns_rows_in_store_order() {
        let client = MockClient::new();
        let (jo, john) = (CustomerId::generate(), CustomerId::generate());
        client.respond(MockResponse::Rows(vec![
            customer_row(jo, "Jo", "Smith"),
            customer_row(john, "John", "Doe"),
        ]));
        let dao = CustomerDao::new(client.clone());

        let filter = SearchFilter {
            first_name: Some("Jo".to_string()),
            ..SearchFilter::default()
        };
        let customers = dao.search(&filter).await.unwrap();

        assert_eq!(customers.len(), 2);
        assert_eq!(customers[0].id, jo);
        assert_eq!(customers[1].id, john);
        let statements = client.statements();
        assert_eq!(statements.len(), 1);
        assert!(statements[0].sql.ends_with("WHERE first_name LIKE $1"));
        assert_eq!(statements[0].params, vec![SqlValue::from("%Jo%")]);
    }

    #[tokio::test]
    async fn test_search_empty_is_success() {
        let dao = CustomerDao::new(MockClient::new());
        let customers = dao.search(&SearchFilter::default()).await.unwrap();
        assert!(customers.is_empty());
    }

    #[tokio::test]
    async fn test_search_failure_is_delivered() {
        let client = MockClient::new();
        client.respond(MockResponse::Fail("connection reset".to_string()));
        let dao = CustomerDao::new(client);
        let outcome = dao.search(&SearchFilter::default()).await;
        assert!(matches!(outcome, Err(DbError::Database(_))));
    }

    #[tokio::test]
    async fn test_customer_exists() {
        let client = MockClient::new();
        client.respond(MockResponse::Rows(vec![Row::new(vec![SqlValue::Int(1)])]));
        let dao = CustomerDao::new(client.clone());
        let id = CustomerId::generate();

        assert!(dao.customer_exists(id).await.unwrap());
        assert!(!dao.customer_exists(id).await.unwrap());
        assert_eq!(client.statements()[0].params, vec![SqlValue::Uuid(id.as_uuid())]);
    }

    #[tokio::test]
    async fn test_get_details_absent_is_none() {
        let dao = CustomerDao::new(MockClient::new());
        assert!(dao.get_details(CustomerId::generate()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_details_decode_failure() {
        let client = MockClient::new();
        client.respond(MockResponse::Rows(vec![Row::new(vec![
            SqlValue::Uuid(CustomerId::generate().as_uuid()),
            SqlValue::from("Jo"),
            SqlValue::from("Smith"),
            SqlValue::from("1980/05/17"),
            SqlValue::Null,
        ])]));
        let dao = CustomerDao::new(client);
        let outcome = dao.get_details(CustomerId::generate()).await;
        assert!(matches!(outcome, Err(DbError::Decode(_))));
    }

    #[tokio::test]
    async fn test_create_returns_generated_id_regardless_of_count() {
        let client = MockClient::new();
        client.respond(MockResponse::Affected(0));
        let dao = CustomerDao::new(client.clone());
        let new_customer = NewCustomer {
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            birth_date: date(1975, 2, 3),
            email: Some("ann@lee.io".to_string()),
        };

        let id = dao.create_customer(new_customer).await.unwrap();

        let statement = &client.statements()[0];
        assert_eq!(statement.sql, REQ_ADD_CUSTOMER);
        assert_eq!(
            statement.params,
            vec![
                SqlValue::Uuid(id.as_uuid()),
                SqlValue::from("Ann"),
                SqlValue::from("Lee"),
                SqlValue::Date(date(1975, 2, 3)),
                SqlValue::from("ann@lee.io"),
            ]
        );
    }

    #[tokio::test]
    async fn test_delete_all_runs_maintenance_and_ignores_failures() {
        let client = MockClient::new();
        client.respond(MockResponse::Affected(3));
        client.respond(MockResponse::Fail("vacuum not allowed".to_string()));
        let dao = CustomerDao::new(client.clone())
            .with_maintenance_statements("VACUUM customer; ;VACUUM address");

        dao.delete_all().await.unwrap();
        client.wait_for_statements(3).await;

        let mut sqls: Vec<String> = client.statements().into_iter().map(|s| s.sql).collect();
        assert_eq!(sqls.remove(0), REQ_DELETE_ALL);
        sqls.sort();
        assert_eq!(sqls, ["VACUUM address", "VACUUM customer"]);
    }

    #[tokio::test]
    async fn test_delete_all_failure_skips_maintenance() {
        let client = MockClient::new();
        client.respond(MockResponse::Fail("lock timeout".to_string()));
        let dao = CustomerDao::new(client.clone()).with_maintenance_statements("VACUUM customer");

        assert!(dao.delete_all().await.is_err());
        tokio::task::yield_now().await;
        assert_eq!(client.statements().len(), 1);
    }
}
