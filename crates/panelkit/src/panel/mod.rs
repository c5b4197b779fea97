//! Panel structure: metadata, declaration and reconciliation.

mod declare;
mod metadata;
mod reconcile;
mod table;

pub use declare::{declare, declare_with_report, is_declared, panel_summary};
pub use metadata::{Identifier, PanelMetadata, parse_step};
pub use reconcile::{ReconcileOptions, ReconciledPanel, Requirement, reconcile};
pub use table::{MISSING_CELL, PanelTable};
