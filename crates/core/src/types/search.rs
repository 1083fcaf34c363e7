//! Customer search criteria.

use chrono::NaiveDate;
use serde::Deserialize;

/// Optional criteria for a customer search.
///
/// Every field is independently optional and an absent field imposes no
/// constraint. Names match by substring, email and birth date match exactly,
/// and the two bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchFilter {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub born_after: Option<NaiveDate>,
    pub born_before: Option<NaiveDate>,
}

impl SearchFilter {
    /// Number of criteria that are set.
    #[must_use]
    pub fn criteria_count(&self) -> usize {
        [
            self.first_name.is_some(),
            self.last_name.is_some(),
            self.email.is_some(),
            self.birth_date.is_some(),
            self.born_after.is_some(),
            self.born_before.is_some(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }

    /// Whether no criterion is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.criteria_count() == 0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        assert!(SearchFilter::default().is_empty());
    }

    #[test]
    fn test_deserialize_partial_query() {
        let filter: SearchFilter =
            serde_json::from_str(r#"{"first_name":"Jo","born_after":"1970-01-01"}"#).unwrap();
        assert_eq!(filter.first_name.as_deref(), Some("Jo"));
        assert_eq!(filter.born_after, NaiveDate::from_ymd_opt(1970, 1, 1));
        assert_eq!(filter.criteria_count(), 2);
    }
}
