//! Schema types for describing table columns.

mod types;

pub use types::ColumnType;
