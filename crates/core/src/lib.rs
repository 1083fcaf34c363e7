//! Customer Directory Core - Shared domain types.
//!
//! This crate provides the types shared by the data-access layer, the business
//! layer and the HTTP surface:
//! - identifiers for customers, addresses and phones
//! - the `Customer`, `Address` and `Phone` entities
//! - the optional-criteria `SearchFilter`
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP.
//! The storage encodings that cross the database boundary (date text, phone
//! type codes) live next to the types they encode so that both directions of
//! every mapping are defined in one place.
//!
//! # Modules
//!
//! - [`types`] - Newtype identifiers, entities, filters and storage codecs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
