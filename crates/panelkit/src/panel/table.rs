//! A table paired with optional panel metadata.

use crate::error::{PanelError, Result};
use crate::input::DataTable;

use super::metadata::PanelMetadata;

/// Marker written for missing numeric results.
pub const MISSING_CELL: &str = "NA";

/// A [`DataTable`] together with the panel metadata declared on it.
///
/// Metadata belongs to this value only. Anything that hands out the bare
/// table or rebuilds its rows drops the metadata; callers re-declare when
/// they need it again.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelTable {
    table: DataTable,
    panel: Option<PanelMetadata>,
}

impl PanelTable {
    /// Wrap a table with no panel metadata.
    pub fn new(table: DataTable) -> Self {
        Self { table, panel: None }
    }

    pub(crate) fn with_panel(table: DataTable, panel: PanelMetadata) -> Self {
        Self {
            table,
            panel: Some(panel),
        }
    }

    /// The underlying table.
    pub fn table(&self) -> &DataTable {
        &self.table
    }

    /// Attached panel metadata, if any.
    pub fn panel(&self) -> Option<&PanelMetadata> {
        self.panel.as_ref()
    }

    /// Remove and return the attached metadata.
    pub fn strip_panel(&mut self) -> Option<PanelMetadata> {
        self.panel.take()
    }

    /// Unwrap the table, discarding metadata.
    pub fn into_table(self) -> DataTable {
        self.table
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.table.row_count()
    }

    /// Read a column as numbers. Null cells become `None`.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<Option<f64>>> {
        let index = self
            .table
            .column_index(name)
            .ok_or_else(|| PanelError::ColumnNotFound {
                column: name.to_string(),
                role: "values",
            })?;

        self.table
            .column_values(index)
            .enumerate()
            .map(|(row, value)| {
                if DataTable::is_null_value(value) {
                    return Ok(None);
                }
                value
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .map(Some)
                    .ok_or_else(|| PanelError::NonNumericValues {
                        column: name.to_string(),
                        row,
                        value: value.to_string(),
                    })
            })
            .collect()
    }

    /// Append a derived numeric column. Rows keep their identity, so the
    /// panel metadata is kept, unless `name` overwrites one of the panel
    /// columns: then the metadata no longer describes the table and is
    /// dropped.
    pub fn with_column(mut self, name: impl Into<String>, values: &[Option<f64>]) -> Result<Self> {
        let name = name.into();
        let cells = values
            .iter()
            .map(|v| match v {
                Some(x) => x.to_string(),
                None => MISSING_CELL.to_string(),
            })
            .collect();
        let overwrites_panel = self
            .panel
            .as_ref()
            .is_some_and(|p| p.panel_columns().contains(&name));
        self.table.push_column(name.as_str(), cells)?;

        if overwrites_panel {
            tracing::warn!(column = %name, "panel column overwritten; panel metadata dropped");
            self.panel = None;
        }
        Ok(self)
    }
}

impl From<DataTable> for PanelTable {
    fn from(table: DataTable) -> Self {
        Self::new(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn table() -> DataTable {
        DataTable::from_columns([
            ("id", vec!["1", "1", "2"]),
            ("x", vec!["1.5", "NA", "3"]),
            ("label", vec!["a", "b", "c"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_numeric_column() {
        let pt = PanelTable::new(table());
        assert_eq!(pt.numeric_column("x").unwrap(), vec![Some(1.5), None, Some(3.0)]);

        let err = pt.numeric_column("label").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
        assert!(matches!(err, PanelError::NonNumericValues { row: 0, .. }));

        let err = pt.numeric_column("nope").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
    }

    #[test]
    fn test_numeric_column_rejects_non_finite() {
        for bad in ["inf", "-inf", "NaN"] {
            let table = DataTable::from_columns([("x", vec!["1", bad])]).unwrap();
            let err = PanelTable::new(table).numeric_column("x").unwrap_err();
            assert!(matches!(err, PanelError::NonNumericValues { row: 1, .. }));
        }
    }

    #[test]
    fn test_with_column_keeps_panel() {
        let pt = PanelTable::with_panel(table(), PanelMetadata::new().with_i("id"));
        let pt = pt.with_column("y", &[Some(-5.0), None, Some(0.5)]).unwrap();
        assert!(pt.panel().is_some());
        assert_eq!(pt.table().column_by_name("y"), Some(vec!["-5", "NA", "0.5"]));
    }

    #[test]
    fn test_with_column_overwriting_panel_column_drops_panel() {
        let pt = PanelTable::with_panel(table(), PanelMetadata::new().with_i("id"));
        let pt = pt.with_column("id", &[Some(7.0), Some(8.0), Some(9.0)]).unwrap();
        assert!(pt.panel().is_none());
        assert_eq!(pt.table().column_by_name("id"), Some(vec!["7", "8", "9"]));
        assert_eq!(pt.table().column_count(), 3);

        // Overwriting a non-panel column keeps the metadata.
        let pt = PanelTable::with_panel(table(), PanelMetadata::new().with_i("id"));
        let pt = pt.with_column("x", &[None, None, None]).unwrap();
        assert!(pt.panel().is_some());
    }

    #[test]
    fn test_strip_and_into_table() {
        let mut pt = PanelTable::with_panel(table(), PanelMetadata::new().with_i("id"));
        assert_eq!(pt.strip_panel(), Some(PanelMetadata::new().with_i("id")));
        assert!(pt.panel().is_none());

        let bare = pt.into_table();
        assert_eq!(PanelTable::from(bare).panel(), None);
    }
}
