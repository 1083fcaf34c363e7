//! Non-blocking data access for the customer directory `PostgreSQL` store.
//!
//! # Tables
//!
//! - `customer` - `id uuid`, `first_name`, `last_name`, `birth_date date`, `email` (nullable)
//! - `address` - `id uuid`, `customer_id` (FK, cascade), `line1`..`line6` (nullable),
//!   `zip_code char(n)`, `city`, `country`
//! - `phone` - `id uuid`, `customer_id` (FK, cascade), `phone_type smallint`, `number`
//!
//! Deleting a customer removes its addresses and phones through the foreign
//! keys; nothing in this module deletes child rows on the customer's behalf.
//!
//! # Layers
//!
//! - [`sql`] - optional-criteria clauses and the `SELECT` builder
//! - [`mapper`] - positional row decoding into domain entities
//! - [`client`] - the `SqlClient` seam and its `PostgreSQL` implementation
//! - [`completion`] - the sink/pending pair every operation completes through
//! - [`customers`], [`addresses`], [`phones`] - one DAO per entity
//!
//! Every DAO operation submits its statement on the Tokio runtime and returns
//! a [`Pending`] immediately, so callers must be inside a runtime context.

pub mod addresses;
pub mod client;
pub mod completion;
pub mod customers;
pub mod mapper;
#[cfg(any(test, feature = "testing"))]
pub mod mock;
pub mod phones;
pub mod sql;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use addresses::AddressDao;
pub use client::{PgClient, Row, SqlClient, SqlValue, Statement};
pub use completion::{CompletionSink, Pending, completion, submit};
pub use customers::CustomerDao;
pub use mapper::DecodeError;
pub use phones::PhoneDao;

/// Errors delivered through a DAO completion.
#[derive(Debug, Error)]
pub enum DbError {
    /// Database error from sqlx (connectivity, constraint violation, ...).
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A returned row could not be decoded into its entity.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The store returned a column type the row codec does not handle.
    #[error("unsupported column type {type_name} at position {index}")]
    UnsupportedColumn {
        /// Column position.
        index: usize,
        /// Store type name.
        type_name: String,
    },

    /// The submitted task ended without delivering an outcome.
    #[error("operation ended without delivering a result")]
    Interrupted,
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
/// * `max_connections` - Upper bound on pooled connections
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(
    database_url: &secrecy::SecretString,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
