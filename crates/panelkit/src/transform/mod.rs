//! Grouped transformations of a value column.

mod aggregate;
mod grouped;

pub use aggregate::{Aggregate, Aggregator};
pub use grouped::{between, within};
