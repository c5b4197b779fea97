//! Session configuration and the main entry point.

use once_cell::sync::Lazy;

use crate::error::Result;
use crate::input::DataTable;
use crate::panel::{self, PanelMetadata, PanelTable, ReconcileOptions, ReconciledPanel};
use crate::transform::{self, Aggregate};
use crate::validation::{UniquenessPolicy, ValidationReport};

/// Process-wide session used by callers that do not bring their own.
static GLOBAL: Lazy<PanelSession> = Lazy::new(PanelSession::new);

/// Configuration for panel operations.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelConfig {
    /// Step filled in when a declaration or override leaves `d` absent.
    pub default_step: f64,
    /// How absent fields are rendered in panel summaries.
    pub null_marker: String,
    /// Log the panel summary after every successful declaration.
    pub announce_declarations: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            default_step: 1.0,
            null_marker: "NA".to_string(),
            announce_declarations: false,
        }
    }
}

impl PanelConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default step.
    pub fn with_default_step(mut self, step: f64) -> Self {
        self.default_step = step;
        self
    }

    /// Set the marker used for absent fields.
    pub fn with_null_marker(mut self, marker: impl Into<String>) -> Self {
        self.null_marker = marker.into();
        self
    }

    /// Log summaries on declaration.
    pub fn with_announce_declarations(mut self, announce: bool) -> Self {
        self.announce_declarations = announce;
        self
    }
}

/// Configuration plus warn-once state that panel operations run under.
///
/// Each session owns its own [`UniquenessPolicy`], so the duplicate-row
/// diagnostic fires at most once per session unless a check is forced.
/// [`PanelSession::global`] gives a process-wide instance.
///
/// ```
/// use panelkit::{Aggregator, DataTable, PanelMetadata, PanelSession};
///
/// let table = DataTable::from_columns([
///     ("id", vec!["1", "1", "2", "2"]),
///     ("t", vec!["1", "2", "1", "2"]),
///     ("x", vec!["10", "20", "30", "50"]),
/// ])
/// .unwrap();
///
/// let session = PanelSession::new();
/// let panel = session
///     .declare(table, PanelMetadata::new().with_i("id").with_t("t"), false)
///     .unwrap();
/// let x = panel.numeric_column("x").unwrap();
/// let demeaned = session
///     .within(&x, &panel, &Aggregator::Mean, &PanelMetadata::new(), false)
///     .unwrap();
/// assert_eq!(demeaned, vec![Some(-5.0), Some(5.0), Some(-10.0), Some(10.0)]);
/// ```
#[derive(Debug, Default)]
pub struct PanelSession {
    config: PanelConfig,
    policy: UniquenessPolicy,
}

impl PanelSession {
    /// Create a session with default configuration.
    pub fn new() -> Self {
        Self::with_config(PanelConfig::default())
    }

    /// Create a session with custom configuration.
    pub fn with_config(config: PanelConfig) -> Self {
        Self {
            config,
            policy: UniquenessPolicy::new(),
        }
    }

    /// The process-wide session.
    pub fn global() -> &'static PanelSession {
        &GLOBAL
    }

    /// Session configuration.
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// The warn-once policy for uniqueness diagnostics.
    pub fn policy(&self) -> &UniquenessPolicy {
        &self.policy
    }

    /// Attach panel metadata to a table. See [`panel::declare`].
    pub fn declare(
        &self,
        table: impl Into<PanelTable>,
        panel: PanelMetadata,
        force_uniqueness_check: bool,
    ) -> Result<PanelTable> {
        panel::declare(self, table, panel, force_uniqueness_check)
    }

    /// Like [`declare`](Self::declare), also returning the validation report.
    pub fn declare_with_report(
        &self,
        table: impl Into<PanelTable>,
        panel: PanelMetadata,
        force_uniqueness_check: bool,
    ) -> Result<(PanelTable, ValidationReport)> {
        panel::declare_with_report(self, table, panel, force_uniqueness_check)
    }

    /// Whether a table carries panel metadata. See [`panel::is_declared`].
    pub fn is_declared(&self, table: &PanelTable, silent: bool) -> bool {
        panel::is_declared(self, table, silent)
    }

    /// Validate a triple against a bare table without attaching anything.
    pub fn check_panel_inputs(
        &self,
        table: &DataTable,
        panel: &PanelMetadata,
        force_uniqueness_check: bool,
    ) -> Result<ValidationReport> {
        crate::validation::check_panel_inputs(table, panel, force_uniqueness_check, &self.policy)
    }

    /// Merge call-site overrides with attached metadata. See
    /// [`panel::reconcile`].
    pub fn reconcile(
        &self,
        table: &PanelTable,
        overrides: &PanelMetadata,
        options: ReconcileOptions,
        operation: &str,
    ) -> Result<ReconciledPanel> {
        panel::reconcile(self, table, overrides, options, operation)
    }

    /// Within transformation. See [`transform::within`].
    pub fn within<A: Aggregate + ?Sized>(
        &self,
        values: &[Option<f64>],
        table: &PanelTable,
        aggregator: &A,
        overrides: &PanelMetadata,
        force_uniqueness_check: bool,
    ) -> Result<Vec<Option<f64>>> {
        transform::within(self, values, table, aggregator, overrides, force_uniqueness_check)
    }

    /// Between transformation. See [`transform::between`].
    pub fn between<A: Aggregate + ?Sized>(
        &self,
        values: &[Option<f64>],
        table: &PanelTable,
        aggregator: &A,
        overrides: &PanelMetadata,
        force_uniqueness_check: bool,
    ) -> Result<Vec<Option<f64>>> {
        transform::between(self, values, table, aggregator, overrides, force_uniqueness_check)
    }
}
