//! Checks a candidate panel triple against a table.

use std::collections::HashSet;

use crate::error::{PanelError, Result};
use crate::input::DataTable;
use crate::panel::PanelMetadata;

use super::diagnostic::{Diagnostic, DiagnosticKind, Evidence, Severity};
use super::policy::UniquenessPolicy;

/// Maximum number of duplicate row indices kept as evidence.
const SAMPLE_ROWS: usize = 5;

/// Outcome of a successful validation.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Advisory diagnostics raised during the check.
    pub diagnostics: Vec<Diagnostic>,
    /// Rows repeating an earlier `(i, t)` combination, when the uniqueness
    /// check ran.
    pub duplicate_rows: Option<usize>,
}

impl ValidationReport {
    /// Whether the uniqueness check ran and found duplicates.
    pub fn has_duplicates(&self) -> bool {
        self.duplicate_rows.is_some_and(|n| n > 0)
    }
}

/// Validate `panel` against `table`.
///
/// Fails on the first violated precondition. On success, and when either
/// `policy` is warn-eligible or `force_uniqueness_check` is set, counts
/// duplicate rows over the present panel columns and raises a uniqueness
/// diagnostic if there are any. Only an ambient (unforced) check that finds
/// duplicates clears the policy's eligibility.
pub fn check_panel_inputs(
    table: &DataTable,
    panel: &PanelMetadata,
    force_uniqueness_check: bool,
    policy: &UniquenessPolicy,
) -> Result<ValidationReport> {
    for name in panel.i.names() {
        check_name("i", name)?;
    }
    if let Some(t) = &panel.t {
        check_name("t", t)?;
    }
    if let Some(d) = panel.d {
        if !d.is_finite() {
            return Err(PanelError::InvalidArgument {
                param: "d",
                expected: "a finite number",
                found: d.to_string(),
            });
        }
    }

    for name in panel.i.names() {
        if !table.has_column(name) {
            return Err(PanelError::ColumnNotFound {
                column: name.clone(),
                role: "entity identifier (i)",
            });
        }
    }
    if let Some(t) = &panel.t {
        if !table.has_column(t) {
            return Err(PanelError::ColumnNotFound {
                column: t.clone(),
                role: "time variable (t)",
            });
        }
    }

    if let (Some(t), Some(d)) = (&panel.t, panel.d) {
        if d != 0.0 {
            let found = table.column_type(t).unwrap_or_default();
            if !found.is_numeric() {
                return Err(PanelError::NonNumericTime {
                    column: t.clone(),
                    step: d,
                    found,
                });
            }
        }
    }

    let mut report = ValidationReport::default();
    if !(policy.is_warn_eligible() || force_uniqueness_check) {
        return Ok(report);
    }

    let columns = panel.panel_columns();
    if columns.is_empty() {
        return Ok(report);
    }

    let duplicates = duplicate_rows(table, &columns);
    report.duplicate_rows = Some(duplicates.len());
    tracing::debug!(
        columns = ?columns,
        duplicates = duplicates.len(),
        forced = force_uniqueness_check,
        "uniqueness check"
    );

    if !duplicates.is_empty() {
        let count = duplicates.len();
        let pct = if table.row_count() == 0 {
            0.0
        } else {
            count as f64 / table.row_count() as f64 * 100.0
        };
        let diagnostic = Diagnostic::new(
            DiagnosticKind::Uniqueness,
            Severity::Warning,
            format!(
                "{} row(s) ({:.1}%) repeat an earlier combination of ({}); \
                 the panel variables do not uniquely identify rows, so operations \
                 that rely on a unique (i, t) may behave unexpectedly",
                count,
                pct,
                columns.join(", ")
            ),
        )
        .with_evidence(
            Evidence::new()
                .with_columns(columns)
                .with_occurrences(count)
                .with_percentage(pct)
                .with_sample_rows(duplicates.into_iter().take(SAMPLE_ROWS).collect()),
        );
        diagnostic.emit();
        report.diagnostics.push(diagnostic);

        if !force_uniqueness_check {
            policy.consume();
        }
    }

    Ok(report)
}

fn check_name(param: &'static str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(PanelError::InvalidArgument {
            param,
            expected: "a non-empty column name",
            found: format!("'{name}'"),
        });
    }
    Ok(())
}

/// Indices of rows whose projection onto `columns` repeats an earlier row.
fn duplicate_rows(table: &DataTable, columns: &[String]) -> Vec<usize> {
    let indices: Vec<usize> = columns
        .iter()
        .filter_map(|c| table.column_index(c))
        .collect();

    let mut seen = HashSet::new();
    (0..table.row_count())
        .filter(|&row| !seen.insert(table.row_key(&indices, row)))
        .collect()
}
