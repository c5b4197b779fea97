//! Within and between transformations over entity groups.
//!
//! Both resolve the entity identifier through the reconciler and group rows
//! by the distinct combinations of the identifier columns. The time variable
//! and step are resolved and validated but do not affect the result.

use indexmap::IndexMap;

use crate::error::{PanelError, Result};
use crate::input::DataTable;
use crate::panel::{PanelMetadata, PanelTable, ReconcileOptions, Requirement, reconcile};
use crate::session::PanelSession;

use super::aggregate::Aggregate;

/// Replace every value with its difference from its group's aggregate.
///
/// Missing values stay missing, as does every value of a group whose
/// aggregate is undefined.
pub fn within<A: Aggregate + ?Sized>(
    session: &PanelSession,
    values: &[Option<f64>],
    table: &PanelTable,
    aggregator: &A,
    overrides: &PanelMetadata,
    force_uniqueness_check: bool,
) -> Result<Vec<Option<f64>>> {
    let groups = resolve_groups(session, values, table, overrides, force_uniqueness_check, "within")?;

    let mut out = vec![None; values.len()];
    for rows in groups.values() {
        let group_values: Vec<Option<f64>> = rows.iter().map(|&r| values[r]).collect();
        let Some(center) = aggregator.aggregate(&group_values) else {
            continue;
        };
        for &row in rows {
            out[row] = values[row].map(|x| x - center);
        }
    }

    Ok(out)
}

/// Replace every value with its group's aggregate minus the aggregate of all
/// values.
///
/// The result is constant within a group and is assigned to every row of
/// the group, including rows whose own value is missing.
pub fn between<A: Aggregate + ?Sized>(
    session: &PanelSession,
    values: &[Option<f64>],
    table: &PanelTable,
    aggregator: &A,
    overrides: &PanelMetadata,
    force_uniqueness_check: bool,
) -> Result<Vec<Option<f64>>> {
    let groups = resolve_groups(session, values, table, overrides, force_uniqueness_check, "between")?;

    let mut out = vec![None; values.len()];
    let Some(grand) = aggregator.aggregate(values) else {
        return Ok(out);
    };

    for rows in groups.values() {
        let group_values: Vec<Option<f64>> = rows.iter().map(|&r| values[r]).collect();
        let centered = aggregator.aggregate(&group_values).map(|g| g - grand);
        for &row in rows {
            out[row] = centered;
        }
    }

    Ok(out)
}

type Groups<'a> = IndexMap<Vec<Option<&'a str>>, Vec<usize>>;

/// Check `values`, resolve the identifier and group row indices by it.
fn resolve_groups<'a>(
    session: &PanelSession,
    values: &[Option<f64>],
    table: &'a PanelTable,
    overrides: &PanelMetadata,
    force_uniqueness_check: bool,
    operation: &str,
) -> Result<Groups<'a>> {
    if values.len() != table.row_count() {
        return Err(PanelError::ValueLength {
            expected: table.row_count(),
            found: values.len(),
        });
    }

    let options = ReconcileOptions::requiring(Requirement::Identifier)
        .with_forced_uniqueness_check(force_uniqueness_check);
    let panel = reconcile(session, table, overrides, options, operation)?;

    Ok(group_rows(table.table(), panel.effective.i.names()))
}

/// Row indices keyed by their identifier values, groups in order of first
/// appearance.
fn group_rows<'a>(table: &'a DataTable, columns: &[String]) -> Groups<'a> {
    let indices: Vec<usize> = columns
        .iter()
        .filter_map(|c| table.column_index(c))
        .collect();

    let mut groups: Groups<'a> = IndexMap::new();
    for row in 0..table.row_count() {
        groups.entry(table.row_key(&indices, row)).or_default().push(row);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::panel::Identifier;
    use crate::transform::Aggregator;

    fn table() -> DataTable {
        DataTable::from_columns([
            ("id", vec!["1", "1", "2", "2"]),
            ("t", vec!["1", "2", "1", "2"]),
            ("x", vec!["10", "20", "30", "50"]),
        ])
        .unwrap()
    }

    fn x() -> Vec<Option<f64>> {
        vec![Some(10.0), Some(20.0), Some(30.0), Some(50.0)]
    }

    #[test]
    fn test_within_example() {
        let session = PanelSession::new();
        let pt = PanelTable::new(table());
        let out = within(&session, &x(), &pt, &Aggregator::Mean, &PanelMetadata::new().with_i("id"), false)
            .unwrap();
        assert_eq!(out, vec![Some(-5.0), Some(5.0), Some(-10.0), Some(10.0)]);
    }

    #[test]
    fn test_between_example() {
        let session = PanelSession::new();
        let pt = PanelTable::new(table());
        let out = between(&session, &x(), &pt, &Aggregator::Mean, &PanelMetadata::new().with_i("id"), false)
            .unwrap();
        assert_eq!(out, vec![Some(-12.5), Some(-12.5), Some(12.5), Some(12.5)]);
    }

    #[test]
    fn test_missing_values() {
        let session = PanelSession::new();
        let pt = PanelTable::new(table());
        let values = vec![Some(10.0), None, None, None];
        let overrides = PanelMetadata::new().with_i("id");

        let w = within(&session, &values, &pt, &Aggregator::Mean, &overrides, false).unwrap();
        assert_eq!(w, vec![Some(0.0), None, None, None]);

        // Group 2 has no values, so its mean is undefined.
        let b = between(&session, &values, &pt, &Aggregator::Mean, &overrides, false).unwrap();
        assert_eq!(b, vec![Some(0.0), Some(0.0), None, None]);

        let b = between(&session, &[None; 4], &pt, &Aggregator::Mean, &overrides, false).unwrap();
        assert_eq!(b, vec![None; 4]);
    }

    #[test]
    fn test_groups_keep_row_order() {
        let table = DataTable::from_columns([
            ("id", vec!["b", "a", "b", "a", "c"]),
            ("x", vec!["1", "2", "3", "4", "5"]),
        ])
        .unwrap();
        let groups = group_rows(&table, &["id".to_string()]);
        let order: Vec<_> = groups.values().cloned().collect();
        assert_eq!(order, vec![vec![0, 2], vec![1, 3], vec![4]]);
    }

    #[test]
    fn test_multi_column_identifier() {
        let table = DataTable::from_columns([
            ("country", vec!["us", "us", "us", "ca"]),
            ("firm", vec!["a", "a", "b", "a"]),
        ])
        .unwrap();
        let session = PanelSession::new();
        let pt = PanelTable::new(table);
        let values = vec![Some(1.0), Some(3.0), Some(5.0), Some(7.0)];
        let out = within(
            &session,
            &values,
            &pt,
            &Aggregator::Mean,
            &PanelMetadata::new().with_i(["country", "firm"]),
            false,
        )
        .unwrap();
        assert_eq!(out, vec![Some(-1.0), Some(1.0), Some(0.0), Some(0.0)]);
    }

    #[test]
    fn test_uses_declared_identifier() {
        let session = PanelSession::new();
        let pt = session
            .declare(table(), PanelMetadata::new().with_i("id").with_t("t"), false)
            .unwrap();
        let out = within(&session, &x(), &pt, &Aggregator::Max, &PanelMetadata::new(), false).unwrap();
        assert_eq!(out, vec![Some(-10.0), Some(0.0), Some(-20.0), Some(0.0)]);
    }

    #[test]
    fn test_requires_identifier() {
        let session = PanelSession::new();
        let pt = PanelTable::new(table());
        let err = within(&session, &x(), &pt, &Aggregator::Mean, &PanelMetadata::new(), false)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingPanel);

        let err = between(&session, &x(), &pt, &Aggregator::Mean, &PanelMetadata::new().with_t("t"), false)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingPanel);
    }

    #[test]
    fn test_empty_identifier_is_missing() {
        let session = PanelSession::new();
        let pt = PanelTable::new(table());
        let empty = PanelMetadata {
            i: Identifier::Multiple(vec![]),
            ..PanelMetadata::default()
        };
        let err = within(&session, &x(), &pt, &Aggregator::Mean, &empty, false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingPanel);

        let err = between(&session, &x(), &pt, &Aggregator::Mean, &empty, false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingPanel);
    }

    #[test]
    fn test_length_mismatch() {
        let session = PanelSession::new();
        let pt = PanelTable::new(table());
        let err = within(&session, &[Some(1.0)], &pt, &Aggregator::Mean, &PanelMetadata::new().with_i("id"), false)
            .unwrap_err();
        assert!(matches!(err, PanelError::ValueLength { expected: 4, found: 1 }));
    }

    #[test]
    fn test_custom_aggregator() {
        let session = PanelSession::new();
        let pt = PanelTable::new(table());
        let first = |v: &[Option<f64>]| v.first().copied().flatten();
        let out = within(&session, &x(), &pt, &first, &PanelMetadata::new().with_i("id"), false).unwrap();
        assert_eq!(out, vec![Some(0.0), Some(10.0), Some(0.0), Some(20.0)]);
    }
}
