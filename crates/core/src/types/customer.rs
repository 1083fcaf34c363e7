//! Customer entity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::id::CustomerId;

/// A stored customer.
///
/// `birth_date` serializes as `yyyy-MM-dd`; a missing email is omitted from
/// the serialized form rather than written as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A customer that has passed validation and is ready to be inserted.
///
/// The identifier is assigned by the data-access layer at submission time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub email: Option<String>,
}

impl NewCustomer {
    /// Attach a generated identifier, producing the stored form.
    #[must_use]
    pub fn with_id(self, id: CustomerId) -> Customer {
        Customer {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            birth_date: self.birth_date,
            email: self.email,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_omits_missing_email() {
        let customer = NewCustomer {
            first_name: "Jo".to_string(),
            last_name: "Smith".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1980, 5, 17).unwrap(),
            email: None,
        }
        .with_id(CustomerId::parse("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap());

        let json = serde_json::to_value(&customer).unwrap();
        assert_eq!(json["birth_date"], "1980-05-17");
        assert!(json.get("email").is_none());
    }
}
