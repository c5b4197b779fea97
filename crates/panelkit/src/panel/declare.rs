//! Declaring panel structure on a table and reading it back.

use crate::error::Result;
use crate::session::PanelSession;
use crate::validation::{Diagnostic, DiagnosticKind, Severity, ValidationReport, check_panel_inputs};

use super::metadata::PanelMetadata;
use super::table::PanelTable;

/// Attach `(i, t, d)` to a table.
///
/// `d` falls back to the session's default step (1 unless configured). The
/// triple is validated first and any failure is returned unchanged. Metadata
/// already on the table is replaced.
pub fn declare(
    session: &PanelSession,
    table: impl Into<PanelTable>,
    panel: PanelMetadata,
    force_uniqueness_check: bool,
) -> Result<PanelTable> {
    declare_with_report(session, table, panel, force_uniqueness_check).map(|(table, _)| table)
}

/// [`declare`], also returning the diagnostics raised while validating.
pub fn declare_with_report(
    session: &PanelSession,
    table: impl Into<PanelTable>,
    mut panel: PanelMetadata,
    force_uniqueness_check: bool,
) -> Result<(PanelTable, ValidationReport)> {
    let table = table.into().into_table();
    if panel.d.is_none() {
        panel.d = Some(session.config().default_step);
    }

    let report = check_panel_inputs(&table, &panel, force_uniqueness_check, session.policy())?;

    if session.config().announce_declarations {
        summary_diagnostic(session, &panel).emit();
    } else {
        tracing::debug!(panel = %panel, "declared panel");
    }

    Ok((PanelTable::with_panel(table, panel), report))
}

/// Whether any of `i`, `t`, `d` is attached to `table`.
///
/// Unless `silent`, a declared table also logs its panel summary.
pub fn is_declared(session: &PanelSession, table: &PanelTable, silent: bool) -> bool {
    match table.panel() {
        Some(panel) if panel.is_declared() => {
            if !silent {
                summary_diagnostic(session, panel).emit();
            }
            true
        }
        _ => false,
    }
}

/// The human-readable summary of a table's panel metadata, or `None` when
/// nothing is declared.
pub fn panel_summary(session: &PanelSession, table: &PanelTable) -> Option<String> {
    table
        .panel()
        .filter(|p| p.is_declared())
        .map(|p| p.summary(&session.config().null_marker))
}

fn summary_diagnostic(session: &PanelSession, panel: &PanelMetadata) -> Diagnostic {
    Diagnostic::new(
        DiagnosticKind::PanelSummary,
        Severity::Info,
        panel.summary(&session.config().null_marker),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::input::DataTable;
    use crate::panel::Identifier;
    use crate::session::PanelConfig;

    fn table() -> DataTable {
        DataTable::from_columns([
            ("id", vec!["1", "1", "2", "2"]),
            ("t", vec!["1", "2", "1", "2"]),
            ("period", vec!["a", "b", "a", "b"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_declare_defaults_step() {
        let session = PanelSession::new();
        let pt = declare(&session, table(), PanelMetadata::new().with_i("id").with_t("t"), false)
            .unwrap();
        let panel = pt.panel().unwrap();
        assert_eq!(panel.i, Identifier::Single("id".into()));
        assert_eq!(panel.t.as_deref(), Some("t"));
        assert_eq!(panel.d, Some(1.0));
    }

    #[test]
    fn test_declare_uses_configured_step() {
        let session = PanelSession::with_config(PanelConfig::new().with_default_step(0.0));
        let pt = declare(&session, table(), PanelMetadata::new().with_t("period"), false).unwrap();
        assert_eq!(pt.panel().unwrap().d, Some(0.0));
    }

    #[test]
    fn test_declare_ordinal_time() {
        let session = PanelSession::new();
        let err = declare(&session, table(), PanelMetadata::new().with_i("id").with_t("period"), false)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Semantic);

        let pt = declare(
            &session,
            table(),
            PanelMetadata::new().with_i("id").with_t("period").with_d(0.0),
            false,
        )
        .unwrap();
        assert!(pt.panel().unwrap().is_ordinal_time());
    }

    #[test]
    fn test_redeclare_replaces() {
        let session = PanelSession::new();
        let pt = declare(&session, table(), PanelMetadata::new().with_i("id"), false).unwrap();
        let pt = declare(&session, pt, PanelMetadata::new().with_t("t"), false).unwrap();
        let panel = pt.panel().unwrap();
        assert!(panel.i.is_absent());
        assert_eq!(panel.t.as_deref(), Some("t"));
    }

    #[test]
    fn test_is_declared() {
        let session = PanelSession::new();
        let bare = PanelTable::new(table());
        assert!(!is_declared(&session, &bare, false));
        assert_eq!(panel_summary(&session, &bare), None);

        let pt = declare(&session, table(), PanelMetadata::new(), false).unwrap();
        assert!(is_declared(&session, &pt, true));
        assert_eq!(
            panel_summary(&session, &pt).unwrap(),
            "Panel Metadata: i = NA, t = NA, d = 1"
        );
    }

    #[test]
    fn test_report_returned() {
        let session = PanelSession::new();
        let (_, report) =
            declare_with_report(&session, table(), PanelMetadata::new().with_i("id"), false).unwrap();
        assert!(report.has_duplicates());
        assert!(!session.policy().is_warn_eligible());
    }
}
