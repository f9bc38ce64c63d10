//! Shared module - Common types and constants
//!
//! Everything here is used by more than one feature and has no
//! dependency on the features themselves.

pub mod constants;
pub mod models;

pub use models::RowLocation;
