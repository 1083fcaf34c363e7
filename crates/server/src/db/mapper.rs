//! Positional row decoding.
//!
//! Each entity declares its columns once, as an enum whose variant order is
//! both the `SELECT` field order and the decode position. DAOs build their
//! projections from [`Column::NAMES`] and the mappers read cells through a
//! [`RowReader`] keyed by the same enum, so the two can not drift apart.

use std::marker::PhantomData;

use thiserror::Error;
use uuid::Uuid;

use customer_directory_core::{
    Address, AddressId, Customer, CustomerId, DateFormatError, Phone, PhoneId, PhoneType,
    parse_storage_date,
};

use super::client::{Row, SqlValue};

/// A row that could not be turned into its entity.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("column {column} is missing from the row")]
    MissingColumn { column: &'static str },

    #[error("column {column} is null")]
    UnexpectedNull { column: &'static str },

    #[error("column {column} is not {expected}")]
    TypeMismatch {
        column: &'static str,
        expected: &'static str,
    },

    #[error("column {column}: {source}")]
    InvalidDate {
        column: &'static str,
        #[source]
        source: DateFormatError,
    },

    #[error("column {column} holds an invalid identifier: {value}")]
    InvalidId { column: &'static str, value: String },
}

/// An ordered column list.
pub trait Column: Copy + 'static {
    /// Column names in decode order.
    const NAMES: &'static [&'static str];

    fn name(self) -> &'static str;

    fn position(self) -> usize;
}

macro_rules! columns {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident { $($variant:ident => $column:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        $vis enum $name {
            $($variant),+
        }

        impl Column for $name {
            const NAMES: &'static [&'static str] = &[$($column),+];

            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $column),+
                }
            }

            fn position(self) -> usize {
                self as usize
            }
        }
    };
}

columns! {
    /// `customer` projection.
    pub enum CustomerColumn {
        Id => "id",
        FirstName => "first_name",
        LastName => "last_name",
        BirthDate => "birth_date",
        Email => "email",
    }
}

columns! {
    /// `address` projection.
    pub enum AddressColumn {
        Id => "id",
        CustomerId => "customer_id",
        Line1 => "line1",
        Line2 => "line2",
        Line3 => "line3",
        Line4 => "line4",
        Line5 => "line5",
        Line6 => "line6",
        ZipCode => "zip_code",
        City => "city",
        Country => "country",
    }
}

columns! {
    /// `phone` projection.
    pub enum PhoneColumn {
        Id => "id",
        CustomerId => "customer_id",
        PhoneType => "phone_type",
        Number => "number",
    }
}

/// An entity decodable from one positional row.
pub trait FromRow: Sized {
    type Column: Column;

    /// # Errors
    ///
    /// Returns [`DecodeError`] when a cell is missing, null where a value is
    /// required, of the wrong type, or unparsable.
    fn from_row(row: &Row) -> Result<Self, DecodeError>;
}

/// Decode every row, keeping the store's order. The first failure wins.
///
/// # Errors
///
/// Returns the first [`DecodeError`] encountered.
pub fn map_rows<T: FromRow>(rows: &[Row]) -> Result<Vec<T>, DecodeError> {
    rows.iter().map(T::from_row).collect()
}

/// Decode the first row, if any.
///
/// # Errors
///
/// Returns [`DecodeError`] if the first row does not decode.
pub fn map_first<T: FromRow>(rows: &[Row]) -> Result<Option<T>, DecodeError> {
    rows.first().map(T::from_row).transpose()
}

/// Typed cell access for one entity's columns.
pub struct RowReader<'a, C> {
    row: &'a Row,
    columns: PhantomData<C>,
}

impl<'a, C: Column> RowReader<'a, C> {
    #[must_use]
    pub const fn new(row: &'a Row) -> Self {
        Self {
            row,
            columns: PhantomData,
        }
    }

    fn cell(&self, column: C) -> Result<&'a SqlValue, DecodeError> {
        self.row
            .get(column.position())
            .ok_or(DecodeError::MissingColumn {
                column: column.name(),
            })
    }

    /// Nullable text.
    pub fn text(&self, column: C) -> Result<Option<&'a str>, DecodeError> {
        match self.cell(column)? {
            SqlValue::Null => Ok(None),
            SqlValue::Text(text) => Ok(Some(text)),
            _ => Err(DecodeError::TypeMismatch {
                column: column.name(),
                expected: "text",
            }),
        }
    }

    /// Non-null text.
    pub fn required_text(&self, column: C) -> Result<&'a str, DecodeError> {
        self.text(column)?.ok_or(DecodeError::UnexpectedNull {
            column: column.name(),
        })
    }

    /// A UUID, native or in its canonical text form.
    pub fn uuid(&self, column: C) -> Result<Uuid, DecodeError> {
        match self.cell(column)? {
            SqlValue::Uuid(id) => Ok(*id),
            SqlValue::Text(text) => Uuid::parse_str(text).map_err(|_| DecodeError::InvalidId {
                column: column.name(),
                value: text.clone(),
            }),
            SqlValue::Null => Err(DecodeError::UnexpectedNull {
                column: column.name(),
            }),
            _ => Err(DecodeError::TypeMismatch {
                column: column.name(),
                expected: "an identifier",
            }),
        }
    }

    /// A `yyyy-MM-dd` date.
    pub fn date(&self, column: C) -> Result<chrono::NaiveDate, DecodeError> {
        parse_storage_date(self.required_text(column)?).map_err(|source| {
            DecodeError::InvalidDate {
                column: column.name(),
                source,
            }
        })
    }

    /// A small integer code.
    pub fn small_int(&self, column: C) -> Result<i16, DecodeError> {
        let mismatch = || DecodeError::TypeMismatch {
            column: column.name(),
            expected: "a small integer",
        };
        match self.cell(column)? {
            SqlValue::SmallInt(value) => Ok(*value),
            SqlValue::Int(value) => i16::try_from(*value).map_err(|_| mismatch()),
            SqlValue::Null => Err(DecodeError::UnexpectedNull {
                column: column.name(),
            }),
            _ => Err(mismatch()),
        }
    }
}

impl FromRow for Customer {
    type Column = CustomerColumn;

    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        use CustomerColumn as C;
        let r = RowReader::<C>::new(row);
        Ok(Self {
            id: CustomerId::new(r.uuid(C::Id)?),
            first_name: r.required_text(C::FirstName)?.to_owned(),
            last_name: r.required_text(C::LastName)?.to_owned(),
            birth_date: r.date(C::BirthDate)?,
            email: r.text(C::Email)?.map(str::to_owned),
        })
    }
}

impl FromRow for Address {
    type Column = AddressColumn;

    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        use AddressColumn as C;
        let r = RowReader::<C>::new(row);
        let mut lines = Vec::new();
        for column in [C::Line1, C::Line2, C::Line3, C::Line4, C::Line5, C::Line6] {
            if let Some(line) = r.text(column)?.filter(|line| !line.is_empty()) {
                lines.push(line.to_owned());
            }
        }
        Ok(Self {
            id: AddressId::new(r.uuid(C::Id)?),
            customer_id: CustomerId::new(r.uuid(C::CustomerId)?),
            lines,
            zip_code: r.required_text(C::ZipCode)?.trim_end().to_owned(),
            city: r.required_text(C::City)?.to_owned(),
            country: r.required_text(C::Country)?.to_owned(),
        })
    }
}

impl FromRow for Phone {
    type Column = PhoneColumn;

    fn from_row(row: &Row) -> Result<Self, DecodeError> {
        use PhoneColumn as C;
        let r = RowReader::<C>::new(row);
        Ok(Self {
            id: PhoneId::new(r.uuid(C::Id)?),
            customer_id: CustomerId::new(r.uuid(C::CustomerId)?),
            phone_type: PhoneType::from_code(r.small_int(C::PhoneType)?),
            number: r.required_text(C::Number)?.to_owned(),
        })
    }
}
