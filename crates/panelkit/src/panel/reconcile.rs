//! Merging per-call panel overrides with attached metadata.
//!
//! Every panel-aware operation takes optional `(i, t, d)` overrides. If the
//! caller supplies any of the three, the overrides win outright; attached
//! metadata is used only when none is supplied. Operations that need an
//! identifier surface [`PanelError::MissingPanel`] from here unchanged.

use crate::error::{PanelError, Result};
use crate::session::PanelSession;
use crate::validation::{ValidationReport, check_panel_inputs};

use super::metadata::PanelMetadata;
use super::table::PanelTable;

/// How much panel structure an operation needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Requirement {
    /// Works without any panel structure.
    #[default]
    None,
    /// Needs at least an identifier or a time variable.
    AnyPanel,
    /// Needs an entity identifier.
    Identifier,
}

/// Options for [`reconcile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReconcileOptions {
    /// Run the uniqueness check even if the session already warned.
    pub force_uniqueness_check: bool,
    /// Structure the calling operation needs.
    pub requirement: Requirement,
}

impl ReconcileOptions {
    /// Options requiring the given structure.
    pub fn requiring(requirement: Requirement) -> Self {
        Self {
            requirement,
            ..Self::default()
        }
    }

    /// Force the uniqueness check.
    pub fn with_forced_uniqueness_check(mut self, force: bool) -> Self {
        self.force_uniqueness_check = force;
        self
    }
}

/// The triple an operation should act on, plus what was attached before.
#[derive(Debug, Clone)]
pub struct ReconciledPanel {
    /// Triple to use for this call.
    pub effective: PanelMetadata,
    /// Metadata attached to the table when the call started.
    pub original: Option<PanelMetadata>,
    /// Whether call-site overrides replaced the attached metadata.
    pub overridden: bool,
    /// Diagnostics from any validation run during reconciliation.
    pub report: ValidationReport,
}

impl ReconciledPanel {
    /// Whether the table carried panel metadata before the call.
    pub fn was_declared(&self) -> bool {
        self.original.as_ref().is_some_and(PanelMetadata::is_declared)
    }

    /// Persist the effective triple on `table`.
    pub fn attach(&self, table: PanelTable) -> PanelTable {
        PanelTable::with_panel(table.into_table(), self.effective.clone())
    }
}

/// Decide which `(i, t, d)` an operation named `operation` acts on.
///
/// Nothing is attached to `table`; callers that want to keep the effective
/// triple use [`ReconciledPanel::attach`].
pub fn reconcile(
    session: &PanelSession,
    table: &PanelTable,
    overrides: &PanelMetadata,
    options: ReconcileOptions,
    operation: &str,
) -> Result<ReconciledPanel> {
    let original = table.panel().cloned();
    let overridden = overrides.is_declared();

    let (effective, report) = if overridden {
        let mut effective = overrides.clone();
        if effective.d.is_none() {
            effective.d = Some(session.config().default_step);
        }
        let report = check_panel_inputs(
            table.table(),
            &effective,
            options.force_uniqueness_check,
            session.policy(),
        )?;
        (effective, report)
    } else {
        let effective = original.clone().unwrap_or_default();
        let report = if options.force_uniqueness_check {
            check_panel_inputs(table.table(), &effective, true, session.policy())?
        } else {
            ValidationReport::default()
        };
        (effective, report)
    };

    let missing = match options.requirement {
        Requirement::None => false,
        Requirement::AnyPanel => effective.i.is_absent() && effective.t.is_none(),
        Requirement::Identifier => effective.i.is_absent(),
    };
    if missing {
        return Err(PanelError::MissingPanel {
            operation: operation.to_string(),
        });
    }

    tracing::debug!(
        operation,
        overridden,
        effective = %effective,
        "reconciled panel"
    );

    Ok(ReconciledPanel {
        effective,
        original,
        overridden,
        report,
    })
}
