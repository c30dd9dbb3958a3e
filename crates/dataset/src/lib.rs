//! # SaleScope Dataset
//!
//! The only crate in the workspace that touches bytes. It turns a delimited sales file into a
//! typed, immutable `SalesTable` and writes any sequence of rows back out as CSV.
//!
//! ## Architectural Principles
//!
//! - **Fail-fast loading:** a missing column or a single unparseable field fails the whole
//!   load. No row is ever silently dropped, so every downstream engine can assume full typing.
//! - **Lossless export:** exported bytes load back into rows equal to the ones written.
//!
//! ## Public API
//!
//! - `load` / `load_path`: read a source into a `SalesTable`.
//! - `write_csv` / `export_csv`: serialize rows with the canonical header.
//! - `Column`: the canonical schema.
//! - `DatasetError`: the specific error types that can be returned from this crate.

pub mod error;
pub mod export;
pub mod loader;
pub mod schema;

pub use error::DatasetError;
pub use export::{export_csv, write_csv};
pub use loader::{MAX_AMOUNT, load, load_path};
pub use schema::Column;
