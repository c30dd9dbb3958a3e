//! # SaleScope Core Types
//!
//! The shared vocabulary of the workspace: the typed `Transaction` row, the immutable
//! `SalesTable` it lives in, and the column selectors (`Dimension`, `SearchField`,
//! `NumericColumn`) the query engines are parameterised by.
//!
//! This is a Layer 0 crate. It knows nothing about files, CSV or configuration.

pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{Dimension, NumericColumn, SearchField};
pub use error::CoreError;
pub use structs::{SalesTable, Transaction};
