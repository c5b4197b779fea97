//! Aggregators applied to groups of values.

use std::str::FromStr;

use crate::error::PanelError;

/// Something that reduces a group of values to one number.
///
/// `None` entries are missing values. Returning `None` means the aggregate
/// is undefined for this group (for example the mean of no values).
pub trait Aggregate {
    /// Reduce `values` to a single number.
    fn aggregate(&self, values: &[Option<f64>]) -> Option<f64>;
}

impl<F> Aggregate for F
where
    F: Fn(&[Option<f64>]) -> Option<f64>,
{
    fn aggregate(&self, values: &[Option<f64>]) -> Option<f64> {
        self(values)
    }
}

/// Built-in aggregators. All of them skip missing and NaN values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Aggregator {
    /// Arithmetic mean.
    #[default]
    Mean,
    /// Middle value; mean of the two middle values for even counts.
    Median,
    /// Sum; zero for a group with no values.
    Sum,
    /// Smallest value.
    Min,
    /// Largest value.
    Max,
}

impl Aggregator {
    /// All built-in aggregators.
    pub fn all() -> &'static [Aggregator] {
        &[
            Aggregator::Mean,
            Aggregator::Median,
            Aggregator::Sum,
            Aggregator::Min,
            Aggregator::Max,
        ]
    }

    /// Look up a built-in by name (case-insensitive).
    pub fn from_name(name: &str) -> Result<Self, PanelError> {
        let lower = name.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|agg| agg.name() == lower)
            .ok_or_else(|| PanelError::UnknownAggregator(name.to_string()))
    }

    /// The aggregator's name.
    pub fn name(&self) -> &'static str {
        match self {
            Aggregator::Mean => "mean",
            Aggregator::Median => "median",
            Aggregator::Sum => "sum",
            Aggregator::Min => "min",
            Aggregator::Max => "max",
        }
    }
}

impl FromStr for Aggregator {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl Aggregate for Aggregator {
    fn aggregate(&self, values: &[Option<f64>]) -> Option<f64> {
        let present = values.iter().flatten().copied().filter(|v| !v.is_nan());

        match self {
            Aggregator::Mean => {
                let (sum, count) = present.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
                (count > 0).then(|| sum / count as f64)
            }
            Aggregator::Median => {
                let mut sorted: Vec<f64> = present.collect();
                if sorted.is_empty() {
                    return None;
                }
                sorted.sort_by(f64::total_cmp);
                let mid = sorted.len() / 2;
                if sorted.len() % 2 == 0 {
                    Some((sorted[mid - 1] + sorted[mid]) / 2.0)
                } else {
                    Some(sorted[mid])
                }
            }
            Aggregator::Sum => Some(present.sum()),
            Aggregator::Min => present.reduce(f64::min),
            Aggregator::Max => present.reduce(f64::max),
        }
    }
}
