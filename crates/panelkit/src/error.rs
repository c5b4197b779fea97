//! Error types for the panelkit library.

use thiserror::Error;

use crate::schema::ColumnType;

/// Coarse classification of a [`PanelError`].
///
/// Callers that only care about *why* a call was rejected (wrong kind of
/// argument, missing column, no panel structure available, ...) can match on
/// this instead of the individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A parameter has the wrong kind of value.
    Type,
    /// More than one time variable was supplied.
    Arity,
    /// A referenced column does not exist (or is ambiguous).
    Schema,
    /// A numeric step was declared against a non-numeric time column.
    Semantic,
    /// An operation needs an entity identifier and none is available.
    MissingPanel,
    /// Panel metadata could not be (de)serialized.
    Serialization,
}

/// Main error type for panel operations.
#[derive(Debug, Error)]
pub enum PanelError {
    /// A parameter has an unusable value.
    #[error("Invalid {param}: expected {expected}, got {found}")]
    InvalidArgument {
        param: &'static str,
        expected: &'static str,
        found: String,
    },

    /// More than one time variable name was supplied.
    #[error("Only one time variable may be given, got {count}: {names:?}")]
    TooManyTimeVariables { count: usize, names: Vec<String> },

    /// A panel variable names a column the table does not have.
    #[error("Column '{column}' given as {role} is not present in the table")]
    ColumnNotFound { column: String, role: &'static str },

    /// Two columns share the same name.
    #[error("Column '{0}' appears more than once")]
    DuplicateColumn(String),

    /// A nonzero step was declared for a time column that is not numeric.
    #[error(
        "Time variable '{column}' is {}, but step d = {step} requires a numeric time column (use d = 0 for ordinal time)",
        .found.label()
    )]
    NonNumericTime {
        column: String,
        step: f64,
        found: ColumnType,
    },

    /// No entity identifier was supplied or attached.
    #[error("{operation} requires panel structure: pass i (and t) or declare the panel first")]
    MissingPanel { operation: String },

    /// A values sequence does not line up with the table rows.
    #[error("Values have {found} entries but the table has {expected} rows")]
    ValueLength { expected: usize, found: usize },

    /// A column used as values holds cells that are not numbers.
    #[error("Column '{column}' is not numeric: row {row} holds '{value}'")]
    NonNumericValues {
        column: String,
        row: usize,
        value: String,
    },

    /// An aggregator name that is not one of the built-ins.
    #[error("Unknown aggregator '{0}' (expected one of: mean, median, sum, min, max)")]
    UnknownAggregator(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PanelError {
    /// The taxonomy bucket this error falls into.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PanelError::InvalidArgument { .. }
            | PanelError::ValueLength { .. }
            | PanelError::NonNumericValues { .. }
            | PanelError::UnknownAggregator(_) => ErrorKind::Type,
            PanelError::TooManyTimeVariables { .. } => ErrorKind::Arity,
            PanelError::ColumnNotFound { .. } | PanelError::DuplicateColumn(_) => {
                ErrorKind::Schema
            }
            PanelError::NonNumericTime { .. } => ErrorKind::Semantic,
            PanelError::MissingPanel { .. } => ErrorKind::MissingPanel,
            PanelError::Json(_) => ErrorKind::Serialization,
        }
    }
}

/// Result type alias for panel operations.
pub type Result<T> = std::result::Result<T, PanelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        let err = PanelError::TooManyTimeVariables {
            count: 2,
            names: vec!["year".into(), "month".into()],
        };
        assert_eq!(err.kind(), ErrorKind::Arity);

        let err = PanelError::MissingPanel {
            operation: "within".into(),
        };
        assert_eq!(err.kind(), ErrorKind::MissingPanel);
        assert!(err.to_string().starts_with("within requires panel structure"));
    }

    #[test]
    fn test_non_numeric_time_message() {
        let err = PanelError::NonNumericTime {
            column: "quarter".into(),
            step: 1.0,
            found: ColumnType::String,
        };
        assert_eq!(err.kind(), ErrorKind::Semantic);
        assert!(err.to_string().contains("d = 0"));
    }
}
