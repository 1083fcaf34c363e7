//! Calendar dates at the storage boundary.
//!
//! Dates are read from the store as fixed-pattern `yyyy-MM-dd` text. Any other
//! textual shape is a decoding failure; there is no lenient fallback.

use chrono::NaiveDate;
use thiserror::Error;

/// The only accepted textual date pattern (`yyyy-MM-dd`).
pub const STORAGE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Error returned when stored date text does not match [`STORAGE_DATE_FORMAT`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid date '{input}', expected yyyy-MM-dd")]
pub struct DateFormatError {
    /// The rejected text.
    pub input: String,
}

/// Parse `yyyy-MM-dd` text into a calendar date.
///
/// The input must be four digits, `-`, two digits, `-`, two digits. chrono
/// alone would accept unpadded, space-padded or signed fields.
///
/// # Errors
///
/// Returns [`DateFormatError`] for any other shape or an impossible date.
pub fn parse_storage_date(text: &str) -> Result<NaiveDate, DateFormatError> {
    let err = || DateFormatError {
        input: text.to_owned(),
    };
    if !has_storage_shape(text) {
        return Err(err());
    }
    NaiveDate::parse_from_str(text, STORAGE_DATE_FORMAT).map_err(|_| err())
}

fn has_storage_shape(text: &str) -> bool {
    text.len() == 10
        && text.bytes().enumerate().all(|(index, byte)| match index {
            4 | 7 => byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}

/// Format a calendar date as `yyyy-MM-dd`.
#[must_use]
pub fn format_storage_date(date: NaiveDate) -> String {
    date.format(STORAGE_DATE_FORMAT).to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_date() {
        let date = parse_storage_date("1982-03-14").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(1982, 3, 14).unwrap());
    }

    #[test]
    fn test_parse_rejects_other_patterns() {
        for input in ["14/03/1982", "1982-3-14", "1982-03-14T00:00:00", "", "1982-02-30"] {
            assert!(parse_storage_date(input).is_err(), "{input} should be rejected");
        }
    }

    #[test]
    fn test_parse_rejects_signed_or_space_padded_fields() {
        let inputs = [
            "1982-03- 4",
            "1982- 3-14",
            "+982-03-14",
            " 982-03-14",
            "1982-3-014",
            "1982-03-+4",
        ];
        for input in inputs {
            assert!(parse_storage_date(input).is_err(), "{input:?} should be rejected");
        }
    }

    #[test]
    fn test_parse_accepts_leading_zero_year() {
        let date = parse_storage_date("0982-03-14").unwrap();
        assert_eq!(format_storage_date(date), "0982-03-14");
    }

    #[test]
    fn test_format_pads_fields() {
        let date = NaiveDate::from_ymd_opt(2001, 1, 2).unwrap();
        assert_eq!(format_storage_date(date), "2001-01-02");
    }
}
