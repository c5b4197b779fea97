//! In-memory tabular data.

use crate::error::{PanelError, Result};
use crate::schema::ColumnType;

/// Represents tabular data held in memory.
///
/// Cells are kept as strings, the way they arrive from a delimited file.
/// Every row has exactly one cell per header.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    /// Column headers.
    pub headers: Vec<String>,
    /// Row data as strings (row-major order).
    pub rows: Vec<Vec<String>>,
    /// The delimiter the data came with (used when writing it back out).
    pub delimiter: u8,
}

impl DataTable {
    /// Create a new data table from headers and rows.
    ///
    /// Short rows are padded with empty (null) cells and long rows are
    /// truncated so every row matches the header count.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>, delimiter: u8) -> Result<Self> {
        check_unique_headers(&headers)?;

        let width = headers.len();
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(idx, mut row)| {
                if row.len() > width {
                    tracing::warn!(
                        row = idx,
                        cells = row.len(),
                        columns = width,
                        "row has more cells than headers; extra cells dropped"
                    );
                }
                row.resize(width, String::new());
                row
            })
            .collect();

        Ok(Self {
            headers,
            rows,
            delimiter,
        })
    }

    /// Build a table from named columns.
    ///
    /// All columns must have the same length.
    pub fn from_columns<N, V, S>(columns: impl IntoIterator<Item = (N, V)>) -> Result<Self>
    where
        N: Into<String>,
        V: IntoIterator<Item = S>,
        S: ToString,
    {
        let mut headers = Vec::new();
        let mut data: Vec<Vec<String>> = Vec::new();
        for (name, values) in columns {
            headers.push(name.into());
            data.push(values.into_iter().map(|v| v.to_string()).collect());
        }
        check_unique_headers(&headers)?;

        let row_count = data.first().map(Vec::len).unwrap_or(0);
        if let Some((idx, col)) = data.iter().enumerate().find(|(_, c)| c.len() != row_count) {
            return Err(PanelError::InvalidArgument {
                param: "columns",
                expected: "columns of equal length",
                found: format!("'{}' has {} values, expected {}", headers[idx], col.len(), row_count),
            });
        }

        let rows = (0..row_count)
            .map(|r| data.iter().map(|col| col[r].clone()).collect())
            .collect();

        Ok(Self {
            headers,
            rows,
            delimiter: b',',
        })
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Whether the table has a column with this name.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Get all values for a column by index.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(|s| s.as_str()).unwrap_or(""))
    }

    /// Get a column by name.
    pub fn column_by_name(&self, name: &str) -> Option<Vec<&str>> {
        let index = self.column_index(name)?;
        Some(self.column_values(index).collect())
    }

    /// Inferred type of a column, or `None` if the column does not exist.
    pub fn column_type(&self, name: &str) -> Option<ColumnType> {
        let index = self.column_index(name)?;
        Some(ColumnType::infer(self.column_values(index)))
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col).map(|s| s.as_str()))
    }

    /// The cells of `row` projected onto `columns`, with null cells as `None`.
    ///
    /// Used as a grouping key: two rows with equal keys belong to the same
    /// group, and all null spellings compare equal.
    pub fn row_key(&self, columns: &[usize], row: usize) -> Vec<Option<&str>> {
        columns
            .iter()
            .map(|&col| {
                self.get(row, col)
                    .map(str::trim)
                    .filter(|v| !Self::is_null_value(v))
            })
            .collect()
    }

    /// Append a column, replacing an existing column of the same name.
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<String>) -> Result<()> {
        if values.len() != self.row_count() {
            return Err(PanelError::ValueLength {
                expected: self.row_count(),
                found: values.len(),
            });
        }

        let name = name.into();
        match self.column_index(&name) {
            Some(idx) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[idx] = value;
                }
            }
            None => {
                self.headers.push(name);
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
        Ok(())
    }

    /// Check if a value represents a missing/null value.
    pub fn is_null_value(value: &str) -> bool {
        let trimmed = value.trim();
        trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("na")
            || trimmed.eq_ignore_ascii_case("n/a")
            || trimmed.eq_ignore_ascii_case("null")
            || trimmed.eq_ignore_ascii_case("none")
            || trimmed.eq_ignore_ascii_case("nil")
            || trimmed == "."
            || trimmed == "-"
    }
}

fn check_unique_headers(headers: &[String]) -> Result<()> {
    for (idx, name) in headers.iter().enumerate() {
        if headers[..idx].contains(name) {
            return Err(PanelError::DuplicateColumn(name.clone()));
        }
    }
    Ok(())
}
