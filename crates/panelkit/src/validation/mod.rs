//! Panel input validation and advisory diagnostics.

mod diagnostic;
mod policy;
mod validator;

pub use diagnostic::{Diagnostic, DiagnosticKind, Evidence, Severity};
pub use policy::UniquenessPolicy;
pub use validator::{ValidationReport, check_panel_inputs};
