//! In-memory table representation.

mod source;

pub use source::DataTable;
