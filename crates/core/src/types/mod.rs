//! Core types for the customer directory.
//!
//! This module provides type-safe wrappers for the directory's domain concepts.

pub mod address;
pub mod customer;
pub mod date;
pub mod id;
pub mod phone;
pub mod search;

pub use address::{Address, MAX_ADDRESS_LINES, NewAddress};
pub use customer::{Customer, NewCustomer};
pub use date::{DateFormatError, STORAGE_DATE_FORMAT, format_storage_date, parse_storage_date};
pub use id::*;
pub use phone::{NewPhone, Phone, PhoneType};
pub use search::SearchFilter;
