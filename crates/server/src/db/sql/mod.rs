//! Dynamic `SELECT` construction from optional criteria.
//!
//! A [`Clause`] is built from a column, a [`Comparison`] and an optional
//! value, or as a text-only substring match; an absent value yields no clause
//! at all. A [`ClauseSet`] keeps the
//! present clauses in insertion order and renders them as one `WHERE`
//! conjunction together with the matching positional parameters. [`Select`]
//! puts the field list, table and clause set together into a [`Statement`].
//!
//! ```
//! use customer_directory_server::db::sql::{ClauseSet, Comparison, Select};
//!
//! let statement = Select::from("customer")
//!     .fields(&["id", "first_name"])
//!     .filter(
//!         ClauseSet::new()
//!             .contains("first_name", Some("Jo"))
//!             .and("email", Comparison::Equals, None::<String>),
//!     )
//!     .build();
//!
//! assert_eq!(statement.sql, "SELECT id, first_name FROM customer WHERE first_name LIKE $1");
//! assert_eq!(statement.params.len(), 1);
//! ```
//!
//! [`Statement`]: super::Statement

mod clause;
mod query;

pub use clause::{Clause, ClauseSet, Comparison, RenderedClauses};
pub use query::Select;
