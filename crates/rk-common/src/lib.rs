//! rowkit common types, identifiers, and errors.
//!
//! This crate provides foundational types shared across rowkit crates:
//! - Row keys and run identifiers
//! - The unified error type with stable error codes
//! - Schema versioning for configuration files
//! - Names of the built-in cell types

pub mod error;
pub mod id;
pub mod schema;
pub mod types;

pub use error::{Error, Result};
pub use id::{RowKey, RunId};
pub use schema::SCHEMA_VERSION;
