//! Column type inference.

use serde::{Deserialize, Serialize};

use crate::input::DataTable;

/// Inferred data type for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Whole numbers (no decimal point).
    Integer,
    /// Floating-point numbers.
    Float,
    /// Boolean words (true/false, yes/no).
    Boolean,
    /// Text/string values.
    String,
    /// No non-null values to judge from.
    #[default]
    Unknown,
}

impl ColumnType {
    /// Returns true if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }

    /// Get a lowercase label.
    pub fn label(&self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Boolean => "boolean",
            ColumnType::String => "string",
            ColumnType::Unknown => "unknown",
        }
    }

    /// Infer the type of a column from its non-null cells.
    ///
    /// A single non-numeric cell makes the whole column non-numeric; integers
    /// mixed with floats promote to [`ColumnType::Float`].
    pub fn infer<'a>(values: impl IntoIterator<Item = &'a str>) -> ColumnType {
        let mut inferred = ColumnType::Unknown;

        for value in values {
            if DataTable::is_null_value(value) {
                continue;
            }
            let detected = detect_value_type(value);
            inferred = match (inferred, detected) {
                (ColumnType::Unknown, t) => t,
                (a, b) if a == b => a,
                (ColumnType::Integer, ColumnType::Float) | (ColumnType::Float, ColumnType::Integer) => {
                    ColumnType::Float
                }
                _ => return ColumnType::String,
            };
        }

        inferred
    }
}

/// Detect the type of a single non-null value.
fn detect_value_type(value: &str) -> ColumnType {
    let trimmed = value.trim();

    if trimmed.parse::<i64>().is_ok() {
        return ColumnType::Integer;
    }
    if trimmed.parse::<f64>().is_ok_and(f64::is_finite) {
        return ColumnType::Float;
    }
    if matches!(
        trimmed.to_lowercase().as_str(),
        "true" | "false" | "yes" | "no"
    ) {
        return ColumnType::Boolean;
    }

    ColumnType::String
}
