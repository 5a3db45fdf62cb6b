//! Crude prevalence.

use polars::prelude::{BooleanChunked, DataFrame};

use crate::error::{EpiError, Result};

/// Counts the `true` entries of an indicator; nulls count as `false`.
pub(crate) fn count_true(indicator: &BooleanChunked) -> usize {
    indicator.into_iter().filter(|flag| *flag == Some(true)).count()
}

/// Share of the rows of `df` flagged by `indicator`.
///
/// The indicator must be aligned with the rows of `df`.
pub fn prevalence(df: &DataFrame, indicator: &BooleanChunked) -> Result<f64> {
    if indicator.len() != df.height() {
        return Err(EpiError::IndicatorLength {
            expected: df.height(),
            actual: indicator.len(),
        });
    }
    if df.height() == 0 {
        return Err(EpiError::EmptyPopulation);
    }
    Ok(count_true(indicator) as f64 / df.height() as f64)
}
