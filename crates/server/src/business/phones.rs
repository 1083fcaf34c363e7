//! Phone operations.

use customer_directory_core::{CustomerId, NewPhone, Phone, PhoneId, PhoneType};
use serde::Deserialize;

use super::customers::CustomerBusiness;
use super::{BusinessError, parse_id};
use crate::db::{PhoneDao, SqlClient};

/// Phone as submitted by a client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PhonePayload {
    /// `LANDLINE` or `MOBILE`.
    #[serde(rename = "type")]
    pub phone_type: Option<String>,
    pub number: Option<String>,
}

impl PhonePayload {
    /// # Errors
    ///
    /// Returns [`BusinessError::InvalidParameters`] if the type or number is
    /// missing, or the type is not one that can be registered.
    pub fn validate(self) -> Result<NewPhone, BusinessError> {
        let (Some(phone_type), Some(number)) = (self.phone_type, self.number) else {
            return Err(BusinessError::InvalidParameters(
                "Phone type and number have to be set".to_string(),
            ));
        };
        let phone_type = phone_type
            .parse::<PhoneType>()
            .map_err(BusinessError::InvalidParameters)?;
        Ok(NewPhone { phone_type, number })
    }
}

/// Phone business logic.
#[derive(Debug, Clone)]
pub struct PhoneBusiness<C> {
    dao: PhoneDao<C>,
    customers: CustomerBusiness<C>,
}

impl<C: SqlClient> PhoneBusiness<C> {
    #[must_use]
    pub const fn new(dao: PhoneDao<C>, customers: CustomerBusiness<C>) -> Self {
        Self { dao, customers }
    }

    /// # Errors
    ///
    /// Returns [`BusinessError::InvalidParameters`] for a malformed id.
    pub async fn list(&self, customer_id: &str) -> Result<Vec<Phone>, BusinessError> {
        let customer_id: CustomerId = parse_id(customer_id)?;
        Ok(self.dao.list_phones(customer_id).await?)
    }

    /// # Errors
    ///
    /// Returns [`BusinessError::NotFound`] if the customer has no such phone.
    pub async fn get(&self, customer_id: &str, phone_id: &str) -> Result<Phone, BusinessError> {
        let customer_id: CustomerId = parse_id(customer_id)?;
        let id: PhoneId = parse_id(phone_id)?;
        self.dao
            .get_phone(customer_id, id)
            .await?
            .ok_or_else(|| not_found(phone_id))
    }

    /// # Errors
    ///
    /// Returns [`BusinessError::NotFound`] if the customer does not exist;
    /// nothing is inserted in that case.
    pub async fn register(
        &self,
        customer_id: &str,
        payload: PhonePayload,
    ) -> Result<PhoneId, BusinessError> {
        let customer_id: CustomerId = parse_id(customer_id)?;
        let phone = payload.validate()?;
        self.customers.ensure_exists(customer_id).await?;
        Ok(self.dao.register_phone(customer_id, phone).await?)
    }

    /// Remove one phone after checking it exists for that customer.
    ///
    /// # Errors
    ///
    /// Returns [`BusinessError::NotFound`] if the customer has no such phone.
    pub async fn delete(&self, customer_id: &str, phone_id: &str) -> Result<(), BusinessError> {
        let customer_id: CustomerId = parse_id(customer_id)?;
        let id: PhoneId = parse_id(phone_id)?;
        if self.dao.get_phone(customer_id, id).await?.is_none() {
            return Err(not_found(phone_id));
        }
        Ok(self.dao.delete_phone(customer_id, id).await?)
    }
}

fn not_found(phone_id: &str) -> BusinessError {
    BusinessError::NotFound(format!("Phone {phone_id} has not been found"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::mock::{MockClient, MockResponse};
    use crate::db::{CustomerDao, Row, SqlValue};

    fn business(client: &MockClient) -> PhoneBusiness<MockClient> {
        PhoneBusiness::new(
            PhoneDao::new(client.clone()),
            CustomerBusiness::new(CustomerDao::new(client.clone())),
        )
    }

    fn payload(phone_type: &str) -> PhonePayload {
        PhonePayload {
            phone_type: Some(phone_type.to_string()),
            number: Some("+44 20 7946 0000".to_string()),
        }
    }

    #[test]
    fn test_validate_parses_known_types() {
        assert_eq!(payload("MOBILE").validate().unwrap().phone_type, PhoneType::Mobile);
        assert_eq!(payload("LANDLINE").validate().unwrap().phone_type, PhoneType::Landline);
    }

    #[test]
    fn test_validate_rejects_unknown_type() {
        for phone_type in ["UNKNOWN", "FAX", "mobile"] {
            let result = payload(phone_type).validate();
            assert!(matches!(result, Err(BusinessError::InvalidParameters(_))));
        }
    }

    #[test]
    fn test_validate_requires_number() {
        let result = PhonePayload { number: None, ..payload("MOBILE") }.validate();
        assert!(matches!(result, Err(BusinessError::InvalidParameters(_))));
    }

    #[tokio::test]
    async fn test_register_for_unknown_customer_is_not_found() {
        let client = MockClient::new();

        let result = business(&client)
            .register(&CustomerId::generate().to_string(), payload("MOBILE"))
            .await;

        assert!(matches!(result, Err(BusinessError::NotFound(_))));
        assert_eq!(client.submissions(), 1);
    }

    #[tokio::test]
    async fn test_delete_missing_phone_is_not_found() {
        let client = MockClient::new();

        let result = business(&client)
            .delete(&CustomerId::generate().to_string(), &PhoneId::generate().to_string())
            .await;

        assert!(matches!(result, Err(BusinessError::NotFound(_))));
        let statements = client.statements();
        assert_eq!(statements.len(), 1);
        assert!(statements[0].sql.starts_with("SELECT"));
    }

    #[tokio::test]
    async fn test_delete_existing_phone() {
        let client = MockClient::new();
        let customer_id = CustomerId::generate();
        let id = PhoneId::generate();
        client.respond(MockResponse::Rows(vec![Row::new(vec![
            SqlValue::Uuid(id.as_uuid()),
            SqlValue::Uuid(customer_id.as_uuid()),
            SqlValue::SmallInt(2),
            SqlValue::from("+44 20 7946 0000"),
        ])]));
        client.respond(MockResponse::Affected(1));

        business(&client)
            .delete(&customer_id.to_string(), &id.to_string())
            .await
            .unwrap();

        let statements = client.statements();
        assert_eq!(statements.len(), 2);
        assert!(statements[1].sql.starts_with("DELETE FROM phone"));
    }

    #[tokio::test]
    async fn test_malformed_phone_id_never_reaches_storage() {
        let client = MockClient::new();

        let result = business(&client)
            .delete(&CustomerId::generate().to_string(), "not-a-token")
            .await;

        assert!(matches!(result, Err(BusinessError::InvalidParameters(_))));
        assert_eq!(client.submissions(), 0);
    }
}
