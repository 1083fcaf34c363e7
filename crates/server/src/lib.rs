//! Customer directory service.
//!
//! A small customer/address/phone directory over HTTP, backed by
//! `PostgreSQL`. Database work is submitted to the Tokio runtime and handed
//! back as a [`db::Pending`] result that completes exactly once.
//!
//! # Layers
//!
//! - [`db`] - query building, row mapping and the DAOs
//! - [`business`] - input validation and not-found translation
//! - [`routes`] - axum handlers mapping outcomes to status codes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod business;
pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod state;

pub use config::DirectoryConfig;
pub use error::AppError;
pub use state::AppState;
