//! Age-adjusted prevalence by direct standardization.
//!
//! The population is split into age strata using the age-bin column. Each
//! stratum's crude prevalence is weighted by the stratum's share of a
//! reference population, and the weighted prevalences are summed.

use std::collections::HashMap;

use polars::prelude::{BooleanChunked, DataFrame, IntoColumn, NamedFrom, PlSmallStr, Series};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EpiError, Result};
use crate::frame::{filter_year, label_values, require_column};
use crate::indicator::superset_indicator;
use crate::options::AdjustmentOptions;
use crate::prevalence::prevalence;

/// Internal column carrying the indicator through the year filter.
const INDICATOR_COLUMN: &str = "__epi_indicator";

/// Which records count as cases.
#[derive(Debug, Clone)]
pub enum PrevalenceSelection {
    /// Precomputed indicator, aligned with the rows of the unfiltered table.
    Indicator(BooleanChunked),
    /// Records whose chronic-condition list contains all of these conditions.
    Comorbidities(Vec<String>),
}

impl PrevalenceSelection {
    pub fn comorbidities<I, S>(conditions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PrevalenceSelection::Comorbidities(conditions.into_iter().map(Into::into).collect())
    }

    fn resolve(&self, df: &DataFrame, options: &AdjustmentOptions) -> Result<BooleanChunked> {
        match self {
            PrevalenceSelection::Indicator(indicator) => Ok(indicator.clone()),
            PrevalenceSelection::Comorbidities(conditions) => {
                superset_indicator(df, &options.columns.classes, conditions.as_slice())
            }
        }
    }
}

/// Weight of one age stratum in the reference population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeWeight {
    pub label: String,
    pub weight: f64,
}

/// Ordered age-bin weights of a reference population.
///
/// Deserializes from a JSON array of `{"label", "weight"}` objects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgeWeights {
    weights: Vec<AgeWeight>,
}

impl AgeWeights {
    pub fn new(weights: Vec<AgeWeight>) -> Self {
        Self { weights }
    }

    /// Parses a JSON array of weights.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AgeWeight> {
        self.weights.iter()
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.weights
            .iter()
            .find(|w| w.label == label)
            .map(|w| w.weight)
    }

    pub fn total(&self) -> f64 {
        self.weights.iter().map(|w| w.weight).sum()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for AgeWeights {
    fn from_iter<T: IntoIterator<Item = (S, f64)>>(iter: T) -> Self {
        Self {
            weights: iter
                .into_iter()
                .map(|(label, weight)| AgeWeight {
                    label: label.into(),
                    weight,
                })
                .collect(),
        }
    }
}

/// Crude and weighted prevalence of one age stratum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StratumPrevalence {
    pub label: String,
    pub n: usize,
    pub cases: usize,
    pub prevalence: f64,
    pub weight: f64,
    pub weighted: f64,
}

/// Crude and age-adjusted prevalence of a population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustedPrevalence {
    /// Prevalence over the whole (year-filtered) population.
    pub raw: f64,
    /// Sum of the weighted stratum prevalences.
    pub adjusted: f64,
    /// Per-stratum breakdown, in weight order.
    pub strata: Vec<StratumPrevalence>,
}

impl AdjustedPrevalence {
    /// `(raw, adjusted)`.
    pub fn as_tuple(&self) -> (f64, f64) {
        (self.raw, self.adjusted)
    }

    /// Stratum table with `raw`, `weights` and `adjusted` columns, indexed by
    /// age-bin label.
    pub fn strata_frame(&self) -> Result<DataFrame> {
        let labels: Vec<&str> = self.strata.iter().map(|s| s.label.as_str()).collect();
        let raw: Vec<f64> = self.strata.iter().map(|s| s.prevalence).collect();
        let weights: Vec<f64> = self.strata.iter().map(|s| s.weight).collect();
        let adjusted: Vec<f64> = self.strata.iter().map(|s| s.weighted).collect();
        Ok(DataFrame::new(vec![
            Series::new("age_bin".into(), labels).into(),
            Series::new("raw".into(), raw).into(),
            Series::new("weights".into(), weights).into(),
            Series::new("adjusted".into(), adjusted).into(),
        ])?)
    }
}

/// Crude and age-adjusted prevalence of the cases picked by `selection`.
///
/// With `options.year` set only that year's rows form the population. Every
/// label in `weights` must have at least one row in the population.
pub fn age_adjusted_frequency(
    df: &DataFrame,
    selection: &PrevalenceSelection,
    weights: &AgeWeights,
    options: &AdjustmentOptions,
) -> Result<AdjustedPrevalence> {
    let columns = &options.columns;
    require_column(df, &columns.age_bin)?;

    let indicator = selection.resolve(df, options)?;
    if indicator.len() != df.height() {
        return Err(EpiError::IndicatorLength {
            expected: df.height(),
            actual: indicator.len(),
        });
    }

    let mut frame = df.clone();
    frame.with_column(
        indicator
            .with_name(PlSmallStr::from_static(INDICATOR_COLUMN))
            .into_column(),
    )?;
    let population = filter_year(&frame, &columns.year, options.year)?;
    let flags = population.column(INDICATOR_COLUMN)?.bool()?.clone();
    let raw = prevalence(&population, &flags)?;

    let bins = label_values(&population, &columns.age_bin)?;
    let mut tallies: HashMap<&str, (usize, usize)> = HashMap::new();
    for (bin, case) in bins.iter().zip(flags.into_iter()) {
        let Some(bin) = bin else { continue };
        let tally = tallies.entry(bin.as_str()).or_default();
        tally.0 += 1;
        if case == Some(true) {
            tally.1 += 1;
        }
    }

    let mut strata = Vec::with_capacity(weights.len());
    for AgeWeight { label, weight } in weights.iter() {
        let (n, cases) = tallies.get(label.as_str()).copied().unwrap_or_default();
        if n == 0 {
            return Err(EpiError::EmptyAgeBin {
                label: label.clone(),
            });
        }
        let stratum_prevalence = cases as f64 / n as f64;
        debug!(
            age_bin = %label,
            n,
            cases,
            prevalence = stratum_prevalence,
            weight,
            "age stratum"
        );
        strata.push(StratumPrevalence {
            label: label.clone(),
            n,
            cases,
            prevalence: stratum_prevalence,
            weight: *weight,
            weighted: stratum_prevalence * weight,
        });
    }
    let adjusted: f64 = strata.iter().map(|s| s.weighted).sum();

    debug!(raw, adjusted, year = ?options.year, "age-adjusted prevalence");
    Ok(AdjustedPrevalence {
        raw,
        adjusted,
        strata,
    })
}
