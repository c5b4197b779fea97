//! panelkit: panel-data declaration and transformations for tabular datasets.
//!
//! A table can be marked as a panel by declaring an entity identifier `i`, a
//! time variable `t` and a time step `d`. The declaration is validated
//! against the table and kept alongside it in a [`PanelTable`]. Panel-aware
//! operations accept per-call overrides of the triple and fall back to the
//! declared metadata when none are given.
//!
//! # Core Principles
//!
//! - **Non-destructive**: transformations return new columns; the table is
//!   never modified in place
//! - **Explicit metadata**: panel structure travels with a [`PanelTable`]
//!   value and is dropped as soon as row identity may have changed
//! - **Advisory diagnostics**: duplicated `(i, t)` combinations are reported,
//!   never rejected
//!
//! # Example
//!
//! ```
//! use panelkit::{Aggregator, DataTable, PanelMetadata, PanelSession};
//!
//! let table = DataTable::from_columns([
//!     ("id", vec!["1", "1", "2", "2"]),
//!     ("t", vec!["1", "2", "1", "2"]),
//!     ("x", vec!["10", "20", "30", "50"]),
//! ])
//! .unwrap();
//!
//! let session = PanelSession::new();
//! let panel = session
//!     .declare(table, PanelMetadata::new().with_i("id").with_t("t"), false)
//!     .unwrap();
//! assert!(session.is_declared(&panel, true));
//!
//! let x = panel.numeric_column("x").unwrap();
//! let between = session
//!     .between(&x, &panel, &Aggregator::Mean, &PanelMetadata::new(), false)
//!     .unwrap();
//! assert_eq!(between, vec![Some(-12.5), Some(-12.5), Some(12.5), Some(12.5)]);
//! ```

pub mod error;
pub mod input;
pub mod panel;
pub mod schema;
pub mod transform;
pub mod validation;

mod session;

pub use crate::session::{PanelConfig, PanelSession};
pub use error::{ErrorKind, PanelError, Result};
pub use input::DataTable;
pub use panel::{
    Identifier, PanelMetadata, PanelTable, ReconcileOptions, ReconciledPanel, Requirement,
};
pub use schema::ColumnType;
pub use transform::{Aggregate, Aggregator};
pub use validation::{Diagnostic, DiagnosticKind, Severity, UniquenessPolicy, ValidationReport};
