//! Database client seam.
//!
//! DAOs talk to the store only through [`SqlClient`]: a statement goes in with
//! its positional parameters, and owned [`Row`]s (or an affected-row count)
//! come back. [`PgClient`] is the production implementation over a `PgPool`.

use std::future::Future;

use chrono::NaiveDate;
use sqlx::postgres::{PgArguments, PgPool, PgRow};
use sqlx::query::Query;
use sqlx::{Column as _, Postgres, Row as _, TypeInfo as _};
use uuid::Uuid;

use customer_directory_core::{AddressId, CustomerId, PhoneId, format_storage_date};

use super::DbError;

/// A single bind value or result cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Null,
    Text(String),
    SmallInt(i16),
    Int(i32),
    BigInt(i64),
    Bool(bool),
    Uuid(Uuid),
    Date(NaiveDate),
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<i16> for SqlValue {
    fn from(value: i16) -> Self {
        Self::SmallInt(value)
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        Self::BigInt(value)
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Uuid> for SqlValue {
    fn from(value: Uuid) -> Self {
        Self::Uuid(value)
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<CustomerId> for SqlValue {
    fn from(value: CustomerId) -> Self {
        Self::Uuid(value.as_uuid())
    }
}

impl From<AddressId> for SqlValue {
    fn from(value: AddressId) -> Self {
        Self::Uuid(value.as_uuid())
    }
}

impl From<PhoneId> for SqlValue {
    fn from(value: PhoneId) -> Self {
        Self::Uuid(value.as_uuid())
    }
}

impl<T: Into<Self>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// One result row, addressed by column position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    values: Vec<SqlValue>,
}

impl Row {
    #[must_use]
    pub const fn new(values: Vec<SqlValue>) -> Self {
        Self { values }
    }

    /// Value at `index`, or `None` past the last column.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SqlValue> {
        self.values.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<SqlValue> for Row {
    fn from_iter<I: IntoIterator<Item = SqlValue>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Statement text plus its positional parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl Statement {
    /// A statement with no parameters bound yet.
    #[must_use]
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Bind the next positional parameter.
    #[must_use]
    pub fn bind(mut self, value: impl Into<SqlValue>) -> Self {
        self.params.push(value.into());
        self
    }
}

/// Asynchronous statement execution.
///
/// Implementations must be cheap to clone and safe to call concurrently from
/// many tasks; DAOs clone the client into every submitted operation.
pub trait SqlClient: Clone + Send + Sync + 'static {
    /// Run a query and return every row in the order the store produced them.
    fn query(&self, statement: Statement)
    -> impl Future<Output = Result<Vec<Row>, DbError>> + Send;

    /// Run an update and return the number of affected rows.
    fn execute(&self, statement: Statement) -> impl Future<Output = Result<u64, DbError>> + Send;
}

/// `SqlClient` backed by a sqlx `PostgreSQL` pool.
#[derive(Debug, Clone)]
pub struct PgClient {
    pool: PgPool,
}

impl PgClient {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl SqlClient for PgClient {
    async fn query(&self, statement: Statement) -> Result<Vec<Row>, DbError> {
        let Statement { sql, params } = statement;
        let rows = bind_params(&sql, params).fetch_all(&self.pool).await?;
        rows.iter().map(decode_row).collect()
    }

    async fn execute(&self, statement: Statement) -> Result<u64, DbError> {
        let Statement { sql, params } = statement;
        let result = bind_params(&sql, params).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

fn bind_params(sql: &str, params: Vec<SqlValue>) -> Query<'_, Postgres, PgArguments> {
    params
        .into_iter()
        .fold(sqlx::query(sql), |query, value| match value {
            SqlValue::Null => query.bind(None::<String>),
            SqlValue::Text(v) => query.bind(v),
            SqlValue::SmallInt(v) => query.bind(v),
            SqlValue::Int(v) => query.bind(v),
            SqlValue::BigInt(v) => query.bind(v),
            SqlValue::Bool(v) => query.bind(v),
            SqlValue::Uuid(v) => query.bind(v),
            SqlValue::Date(v) => query.bind(v),
        })
}

/// Convert a driver row into an owned positional row.
///
/// `DATE` columns are handed to the mapper as `yyyy-MM-dd` text.
fn decode_row(row: &PgRow) -> Result<Row, DbError> {
    row.columns()
        .iter()
        .map(|column| decode_value(row, column.ordinal(), column.type_info().name()))
        .collect()
}

fn decode_value(row: &PgRow, index: usize, type_name: &str) -> Result<SqlValue, DbError> {
    let value = match type_name {
        "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => {
            row.try_get::<Option<String>, _>(index)?.map(SqlValue::Text)
        }
        "INT2" => row.try_get::<Option<i16>, _>(index)?.map(SqlValue::SmallInt),
        "INT4" => row.try_get::<Option<i32>, _>(index)?.map(SqlValue::Int),
        "INT8" => row.try_get::<Option<i64>, _>(index)?.map(SqlValue::BigInt),
        "BOOL" => row.try_get::<Option<bool>, _>(index)?.map(SqlValue::Bool),
        "UUID" => row.try_get::<Option<Uuid>, _>(index)?.map(SqlValue::Uuid),
        "DATE" => row
            .try_get::<Option<NaiveDate>, _>(index)?
            .map(|date| SqlValue::Text(format_storage_date(date))),
        other => {
            return Err(DbError::UnsupportedColumn {
                index,
                type_name: other.to_owned(),
            });
        }
    };
    Ok(value.unwrap_or(SqlValue::Null))
}
