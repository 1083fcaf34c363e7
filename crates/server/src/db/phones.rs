//! Phone data access.
//!
//! Phones are always addressed through their owner: a phone id paired with
//! the wrong customer id matches nothing.

use customer_directory_core::{CustomerId, NewPhone, Phone, PhoneId};

use super::client::{SqlClient, Statement};
use super::completion::{Pending, submit};
use super::mapper::{Column, PhoneColumn, map_first, map_rows};
use super::sql::{ClauseSet, Comparison, Select};

const TABLE: &str = "phone";

const REQ_ADD_PHONE: &str =
    "INSERT INTO phone (id, customer_id, phone_type, number) VALUES ($1, $2, $3, $4)";

const REQ_DELETE_PHONE: &str = "DELETE FROM phone WHERE id = $1 AND customer_id = $2";

/// Phone DAO.
#[derive(Debug, Clone)]
pub struct PhoneDao<C> {
    client: C,
}

impl<C: SqlClient> PhoneDao<C> {
    #[must_use]
    pub const fn new(client: C) -> Self {
        Self { client }
    }

    /// Insert `phone` for `customer_id`; the type is stored as its numeric code.
    pub fn register_phone(&self, customer_id: CustomerId, phone: NewPhone) -> Pending<PhoneId> {
        let id = PhoneId::generate();
        let statement = Statement::new(REQ_ADD_PHONE)
            .bind(id)
            .bind(customer_id)
            .bind(phone.phone_type.code())
            .bind(phone.number);
        tracing::debug!(customer_id = %customer_id, phone_id = %id, "registering phone");
        let client = self.client.clone();
        submit(async move {
            client.execute(statement).await?;
            Ok(id)
        })
    }

    pub fn get_phone(&self, customer_id: CustomerId, id: PhoneId) -> Pending<Option<Phone>> {
        let client = self.client.clone();
        let statement = select(
            ClauseSet::new()
                .and(PhoneColumn::Id.name(), Comparison::Equals, Some(id))
                .and(PhoneColumn::CustomerId.name(), Comparison::Equals, Some(customer_id)),
        );
        submit(async move {
            let rows = client.query(statement).await?;
            Ok(map_first(&rows)?)
        })
    }

    pub fn list_phones(&self, customer_id: CustomerId) -> Pending<Vec<Phone>> {
        let client = self.client.clone();
        let statement = select(ClauseSet::new().and(
            PhoneColumn::CustomerId.name(),
            Comparison::Equals,
            Some(customer_id),
        ));
        submit(async move {
            let rows = client.query(statement).await?;
            Ok(map_rows(&rows)?)
        })
    }

    pub fn delete_phone(&self, customer_id: CustomerId, id: PhoneId) -> Pending<()> {
        let client = self.client.clone();
        let statement = Statement::new(REQ_DELETE_PHONE).bind(id).bind(customer_id);
        tracing::debug!(customer_id = %customer_id, phone_id = %id, "deleting phone");
        submit(async move {
            client.execute(statement).await?;
            Ok(())
        })
    }
}

fn select(filter: ClauseSet) -> Statement {
    Select::from(TABLE)
        .fields(PhoneColumn::NAMES)
        .filter(filter)
        .build()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use customer_directory_core::PhoneType;

    use super::*;
    use crate::db::mock::{MockClient, MockResponse};
    use crate::db::{DbError, DecodeError, Row, SqlValue};

    #[tokio::test]
    async fn test_lookups_select_mapper_columns() {
        let client = MockClient::new();
        let dao = PhoneDao::new(client.clone());
        let customer_id = CustomerId::generate();

        dao.get_phone(customer_id, PhoneId::generate()).await.unwrap();
        dao.list_phones(customer_id).await.unwrap();

        let statements = client.statements();
        assert_eq!(
            statements[0].sql,
            "SELECT id, customer_id, phone_type, number FROM phone \
             WHERE id = $1 AND customer_id = $2"
        );
        assert_eq!(
            statements[1].sql,
            "SELECT id, customer_id, phone_type, number FROM phone WHERE customer_id = $1"
        );
    }

    #[tokio::test]
    async fn test_register_stores_type_code() {
        let client = MockClient::new();
        let dao = PhoneDao::new(client.clone());
        let customer_id = CustomerId::generate();

        let id = dao
            .register_phone(
                customer_id,
                NewPhone {
                    phone_type: PhoneType::Mobile,
                    number: "+33 6 12 34 56 78".to_string(),
                },
            )
            .await
            .unwrap();

        let statement = &client.statements()[0];
        assert_eq!(
            statement.params,
            vec![
                SqlValue::Uuid(id.as_uuid()),
                SqlValue::Uuid(customer_id.as_uuid()),
                SqlValue::SmallInt(PhoneType::Mobile.code()),
                SqlValue::from("+33 6 12 34 56 78"),
            ]
        );
    }

    #[tokio::test]
    async fn test_get_keeps_unknown_codes() {
        let client = MockClient::new();
        let customer_id = CustomerId::generate();
        let id = PhoneId::generate();
        client.respond(MockResponse::Rows(vec![Row::new(vec![
            SqlValue::Uuid(id.as_uuid()),
            SqlValue::Uuid(customer_id.as_uuid()),
            SqlValue::SmallInt(42),
            SqlValue::from("0102030405"),
        ])]));
        let dao = PhoneDao::new(client.clone());

        let phone = dao.get_phone(customer_id, id).await.unwrap().unwrap();

        assert_eq!(phone.phone_type, PhoneType::Unknown(42));
        assert_eq!(
            client.statements()[0].params,
            vec![SqlValue::Uuid(id.as_uuid()), SqlValue::Uuid(customer_id.as_uuid())]
        );
    }

    #[tokio::test]
    async fn test_list_rejects_null_number() {
        let client = MockClient::new();
        client.respond(MockResponse::Rows(vec![Row::new(vec![
            SqlValue::Uuid(PhoneId::generate().as_uuid()),
            SqlValue::Uuid(CustomerId::generate().as_uuid()),
            SqlValue::SmallInt(1),
            SqlValue::Null,
        ])]));
        let dao = PhoneDao::new(client);

        let result = dao.list_phones(CustomerId::generate()).await;

        assert!(matches!(
            result,
            Err(DbError::Decode(DecodeError::UnexpectedNull { .. }))
        ));
    }

    #[tokio::test]
    async fn test_delete_scopes_to_owner() {
        let client = MockClient::new();
        client.respond(MockResponse::Affected(1));
        let dao = PhoneDao::new(client.clone());
        let customer_id = CustomerId::generate();
        let id = PhoneId::generate();

        dao.delete_phone(customer_id, id).await.unwrap();

        let statement = &client.statements()[0];
        assert_eq!(statement.sql, REQ_DELETE_PHONE);
        assert_eq!(
            statement.params,
            vec![SqlValue::Uuid(id.as_uuid()), SqlValue::Uuid(customer_id.as_uuid())]
        );
    }
}
