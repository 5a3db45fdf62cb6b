//! Age binning.
//!
//! A bin covers `lower <= age < upper`. Bins are checked in order and the
//! first match wins, so overlapping definitions resolve to the earlier bin.

use polars::prelude::{DataFrame, NamedFrom, Series};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{EpiError, Result};
use crate::frame::i64_values;
use crate::options::EpiColumns;

/// One labelled age interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeBin {
    pub label: String,
    /// Inclusive lower bound.
    pub lower: i64,
    /// Exclusive upper bound.
    pub upper: i64,
}

impl AgeBin {
    pub fn new(label: impl Into<String>, lower: i64, upper: i64) -> Self {
        Self {
            label: label.into(),
            lower,
            upper,
        }
    }

    pub fn contains(&self, age: i64) -> bool {
        self.lower <= age && age < self.upper
    }
}

/// Ordered age bin definition.
///
/// Deserializes from a JSON array of `{"label", "lower", "upper"}` objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgeBins {
    bins: Vec<AgeBin>,
}

impl AgeBins {
    /// Builds a definition from parallel label and `(lower, upper)` sequences.
    pub fn new<L, B>(labels: L, bounds: B) -> Result<Self>
    where
        L: IntoIterator,
        L::Item: Into<String>,
        B: IntoIterator<Item = (i64, i64)>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let bounds: Vec<(i64, i64)> = bounds.into_iter().collect();
        if labels.len() != bounds.len() {
            return Err(EpiError::BinDefinition {
                labels: labels.len(),
                bins: bounds.len(),
            });
        }
        let bins = labels
            .into_iter()
            .zip(bounds)
            .map(|(label, (lower, upper))| AgeBin { label, lower, upper })
            .collect();
        Ok(Self { bins })
    }

    pub fn from_bins(bins: Vec<AgeBin>) -> Self {
        Self { bins }
    }

    /// Parses a JSON array of bins.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn bins(&self) -> &[AgeBin] {
        &self.bins
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.bins.iter().map(|bin| bin.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}

/// Returns the label of the first bin containing `age`, or `None`.
///
/// ```
/// use epi_stats::{AgeBins, age_bin};
///
/// let bins = AgeBins::new(["0-64", "65+"], [(0, 65), (65, 200)]).unwrap();
/// assert_eq!(age_bin(70, &bins), Some("65+"));
/// assert_eq!(age_bin(-1, &bins), None);
/// ```
pub fn age_bin(age: i64, bins: &AgeBins) -> Option<&str> {
    bins.bins
        .iter()
        .find(|bin| bin.contains(age))
        .map(|bin| bin.label.as_str())
}

/// Returns a copy of `df` with the age-bin column set from the age column.
///
/// Ages outside every bin, and null ages, get a null label.
pub fn assign_age_bins(df: &DataFrame, bins: &AgeBins, columns: &EpiColumns) -> Result<DataFrame> {
    let ages = i64_values(df, &columns.age)?;
    let labels: Vec<Option<&str>> = ages
        .iter()
        .map(|age| age.and_then(|age| age_bin(age, bins)))
        .collect();

    let unmatched = labels.iter().filter(|label| label.is_none()).count();
    if unmatched > 0 {
        warn!(
            column = %columns.age,
            unmatched,
            rows = df.height(),
            "ages outside every age bin"
        );
    }
    debug!(bins = bins.len(), rows = df.height(), "assigned age bins");

    let mut out = df.clone();
    out.with_column(Series::new(columns.age_bin.as_str().into(), labels))?;
    Ok(out)
}
