//! Advisory diagnostics raised while checking panel structure.
//!
//! Diagnostics never fail an operation. They are returned to the caller and
//! emitted through `tracing` at the level matching their severity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a diagnostic is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The panel variables do not uniquely identify rows.
    Uniqueness,
    /// Human-readable summary of declared panel metadata.
    PanelSummary,
}

impl DiagnosticKind {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            DiagnosticKind::Uniqueness => "Uniqueness",
            DiagnosticKind::PanelSummary => "Panel Summary",
        }
    }
}

/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational only.
    Info,
    /// Potential issue that should be reviewed.
    Warning,
}

impl Severity {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Warning => "Warning",
        }
    }
}

/// Evidence supporting a diagnostic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    /// Columns the diagnostic concerns.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub columns: Vec<String>,
    /// Number of affected rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurrences: Option<usize>,
    /// Percentage of affected rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
    /// Sample row indices.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub sample_rows: Vec<usize>,
}

impl Evidence {
    /// Create empty evidence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the columns involved.
    pub fn with_columns(mut self, columns: Vec<String>) -> Self {
        self.columns = columns;
        self
    }

    /// Set occurrences.
    pub fn with_occurrences(mut self, count: usize) -> Self {
        self.occurrences = Some(count);
        self
    }

    /// Set percentage.
    pub fn with_percentage(mut self, pct: f64) -> Self {
        self.percentage = Some(pct);
        self
    }

    /// Set sample rows.
    pub fn with_sample_rows(mut self, rows: Vec<usize>) -> Self {
        self.sample_rows = rows;
        self
    }
}

/// An advisory message about a table's panel structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Unique identifier for this diagnostic.
    pub id: String,
    /// What the diagnostic is about.
    #[serde(rename = "type")]
    pub kind: DiagnosticKind,
    /// Severity level.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Supporting evidence.
    pub evidence: Evidence,
    /// When raised.
    pub detected_at: DateTime<Utc>,
}

impl Diagnostic {
    /// Create a new diagnostic.
    pub fn new(kind: DiagnosticKind, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            id: generate_diagnostic_id(),
            kind,
            severity,
            message: message.into(),
            evidence: Evidence::new(),
            detected_at: Utc::now(),
        }
    }

    /// Set the evidence.
    pub fn with_evidence(mut self, evidence: Evidence) -> Self {
        self.evidence = evidence;
        self
    }

    /// Log this diagnostic at the level matching its severity.
    pub fn emit(&self) {
        match self.severity {
            Severity::Warning => tracing::warn!(
                kind = self.kind.label(),
                columns = ?self.evidence.columns,
                "{}",
                self.message
            ),
            Severity::Info => tracing::info!(kind = self.kind.label(), "{}", self.message),
        }
    }
}

/// Generate a unique diagnostic ID.
fn generate_diagnostic_id() -> String {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(1);
    format!("diag_{:03}", COUNTER.fetch_add(1, Ordering::SeqCst))
}
