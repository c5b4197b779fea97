//! Panel metadata: entity identifier, time variable and time step.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PanelError, Result};

/// Column(s) naming the cross-sectional unit.
///
/// Equality compares the column names, so `Multiple` with one name equals
/// `Single` and an empty `Multiple` equals `Absent`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub enum Identifier {
    /// No entity grouping; the table is a single time series.
    #[default]
    Absent,
    /// One identifier column.
    Single(String),
    /// Several columns that together identify the unit.
    Multiple(Vec<String>),
}

impl Identifier {
    /// Whether no identifier column is given.
    pub fn is_absent(&self) -> bool {
        self.names().is_empty()
    }

    /// The canonical form: no names is `Absent`, one name is `Single`.
    pub fn normalized(self) -> Self {
        Vec::from(self).into()
    }

    /// The identifier column names, in order.
    pub fn names(&self) -> &[String] {
        match self {
            Identifier::Absent => &[],
            Identifier::Single(name) => std::slice::from_ref(name),
            Identifier::Multiple(names) => names,
        }
    }
}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        self.names() == other.names()
    }
}

impl Eq for Identifier {}

impl From<Vec<String>> for Identifier {
    fn from(mut names: Vec<String>) -> Self {
        match names.len() {
            0 => Identifier::Absent,
            1 => Identifier::Single(names.remove(0)),
            _ => Identifier::Multiple(names),
        }
    }
}

impl From<Identifier> for Vec<String> {
    fn from(id: Identifier) -> Self {
        match id {
            Identifier::Absent => Vec::new(),
            Identifier::Single(name) => vec![name],
            Identifier::Multiple(names) => names,
        }
    }
}

impl From<&str> for Identifier {
    fn from(name: &str) -> Self {
        Identifier::Single(name.to_string())
    }
}

impl From<String> for Identifier {
    fn from(name: String) -> Self {
        Identifier::Single(name)
    }
}

impl<const N: usize> From<[&str; N]> for Identifier {
    fn from(names: [&str; N]) -> Self {
        names.iter().map(|s| s.to_string()).collect::<Vec<_>>().into()
    }
}

/// The `(i, t, d)` triple describing a panel.
///
/// Used both for metadata attached to a [`PanelTable`](super::PanelTable) and
/// for per-call overrides. Every field may be absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PanelMetadata {
    /// Entity identifier column(s).
    #[serde(default)]
    pub i: Identifier,
    /// Time variable column.
    #[serde(default)]
    pub t: Option<String>,
    /// Step between consecutive periods; `0` means ordinal time.
    #[serde(default)]
    pub d: Option<f64>,
}

impl PanelMetadata {
    /// An empty triple.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a triple from loosely-typed parts, such as repeated command-line
    /// flags. More than one time variable is rejected.
    pub fn from_parts(i: Vec<String>, t: Vec<String>, d: Option<f64>) -> Result<Self> {
        if t.len() > 1 {
            return Err(PanelError::TooManyTimeVariables {
                count: t.len(),
                names: t,
            });
        }

        Ok(Self {
            i: Identifier::from(i),
            t: t.into_iter().next(),
            d,
        })
    }

    /// Set the entity identifier.
    pub fn with_i(mut self, i: impl Into<Identifier>) -> Self {
        let i: Identifier = i.into();
        self.i = i.normalized();
        self
    }

    /// Set the time variable.
    pub fn with_t(mut self, t: impl Into<String>) -> Self {
        self.t = Some(t.into());
        self
    }

    /// Set the time step.
    pub fn with_d(mut self, d: f64) -> Self {
        self.d = Some(d);
        self
    }

    /// Whether any of `i`, `t` or `d` is present.
    pub fn is_declared(&self) -> bool {
        !self.i.is_absent() || self.t.is_some() || self.d.is_some()
    }

    /// Whether time is ordinal (`d == 0`): observation order within each
    /// entity is the time order.
    pub fn is_ordinal_time(&self) -> bool {
        self.d == Some(0.0)
    }

    /// Columns the panel variables refer to, identifier first.
    pub fn panel_columns(&self) -> Vec<String> {
        let mut cols = self.i.names().to_vec();
        if let Some(t) = &self.t {
            cols.push(t.clone());
        }
        cols
    }

    /// Render the triple for humans, printing absent fields as `null_marker`.
    pub fn summary(&self, null_marker: &str) -> String {
        let i = if self.i.is_absent() {
            null_marker.to_string()
        } else {
            self.i.names().join(", ")
        };
        let t = self.t.as_deref().unwrap_or(null_marker);
        let d = self
            .d
            .map(|d| d.to_string())
            .unwrap_or_else(|| null_marker.to_string());
        format!("Panel Metadata: i = {i}, t = {t}, d = {d}")
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl fmt::Display for PanelMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary("NA"))
    }
}

/// Parse a textual time step.
pub fn parse_step(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(d) if d.is_finite() => Ok(d),
        _ => Err(PanelError::InvalidArgument {
            param: "d",
            expected: "a finite number",
            found: format!("'{trimmed}'"),
        }),
    }
}
