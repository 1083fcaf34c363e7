//! Phone entity and its storage type codes.
//!
//! The phone type crosses the storage boundary as a small integer:
//!
//! | Variant    | Code |
//! |------------|------|
//! | `Landline` | 1    |
//! | `Mobile`   | 2    |
//!
//! Any other code decodes to [`PhoneType::Unknown`], which keeps the raw code
//! so that re-encoding a row read from a newer schema is lossless.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::id::{CustomerId, PhoneId};

/// Kind of phone line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhoneType {
    Landline,
    Mobile,
    /// A code this build does not know about.
    Unknown(i16),
}

impl PhoneType {
    /// Decode a storage code. Never fails.
    #[must_use]
    pub const fn from_code(code: i16) -> Self {
        match code {
            1 => Self::Landline,
            2 => Self::Mobile,
            other => Self::Unknown(other),
        }
    }

    /// Storage code for this type.
    #[must_use]
    pub const fn code(self) -> i16 {
        match self {
            Self::Landline => 1,
            Self::Mobile => 2,
            Self::Unknown(code) => code,
        }
    }

    /// Wire name used in JSON payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Landline => "LANDLINE",
            Self::Mobile => "MOBILE",
            Self::Unknown(_) => "UNKNOWN",
        }
    }

    /// Whether this is one of the known types.
    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl std::fmt::Display for PhoneType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PhoneType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LANDLINE" => Ok(Self::Landline),
            "MOBILE" => Ok(Self::Mobile),
            _ => Err(format!("invalid phone type: {s}")),
        }
    }
}

impl Serialize for PhoneType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PhoneType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A stored phone number belonging to one customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Phone {
    pub id: PhoneId,
    #[serde(skip_serializing)]
    pub customer_id: CustomerId,
    #[serde(rename = "type")]
    pub phone_type: PhoneType,
    pub number: String,
}

/// A phone that has passed validation and is ready to be registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPhone {
    pub phone_type: PhoneType,
    pub number: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_code_table_is_bidirectional() {
        for phone_type in [PhoneType::Landline, PhoneType::Mobile] {
            assert_eq!(PhoneType::from_code(phone_type.code()), phone_type);
        }
        assert_eq!(PhoneType::Landline.code(), 1);
        assert_eq!(PhoneType::Mobile.code(), 2);
    }

    #[test]
    fn test_unknown_code_is_tolerated() {
        let decoded = PhoneType::from_code(9);
        assert_eq!(decoded, PhoneType::Unknown(9));
        assert!(!decoded.is_known());
        assert_eq!(decoded.code(), 9);
        assert_eq!(decoded.to_string(), "UNKNOWN");
    }

    #[test]
    fn test_json_names() {
        let json = serde_json::to_string(&PhoneType::Mobile).unwrap();
        assert_eq!(json, "\"MOBILE\"");
        let parsed: PhoneType = serde_json::from_str("\"LANDLINE\"").unwrap();
        assert_eq!(parsed, PhoneType::Landline);
        assert!(serde_json::from_str::<PhoneType>("\"UNKNOWN\"").is_err());
    }
}
