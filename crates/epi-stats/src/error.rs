//! Error types for epidemiological aggregation.

use thiserror::Error;

/// Errors raised by the aggregation functions.
///
/// Conditions that would otherwise surface as a division by zero or a NaN
/// (empty strata, zero spending, invalid proportions) are reported here
/// instead of being silently corrected.
#[derive(Debug, Error)]
pub enum EpiError {
    // === Table Errors ===
    /// Column not found in the input table.
    #[error("column '{column}' not found in DataFrame")]
    ColumnNotFound { column: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },

    /// Indicator does not line up with the table rows.
    #[error("indicator has {actual} values but the table has {expected} rows")]
    IndicatorLength { expected: usize, actual: usize },

    // === Interval Errors ===
    /// Sample size must be positive.
    #[error("sample size must be positive, got {n}")]
    InvalidSampleSize { n: usize },

    /// Proportion must lie in [0, 1].
    #[error("proportion must be within [0, 1], got {p}")]
    InvalidProportion { p: f64 },

    /// Significance level must lie strictly between 0 and 1.
    #[error("alpha must be within (0, 1), got {alpha}")]
    InvalidAlpha { alpha: f64 },

    /// Failed to build the reference distribution.
    #[error("distribution error: {message}")]
    Distribution { message: String },

    // === Empty Strata ===
    /// Category has no rows (for the selected year).
    #[error("category '{category}' has no rows")]
    EmptyCategory { category: String },

    /// Total spending of the population is zero.
    #[error("total spending is zero; yearly spending share is undefined")]
    ZeroTotalSpending,

    /// Population has no rows.
    #[error("population is empty; prevalence is undefined")]
    EmptyPopulation,

    /// Age bin named in the weights has no rows.
    #[error("age bin '{label}' has no rows")]
    EmptyAgeBin { label: String },

    // === Configuration Errors ===
    /// Labels and bounds of an age bin definition differ in length.
    #[error("age bin definition has {labels} labels but {bins} bounds")]
    BinDefinition { labels: usize, bins: usize },

    /// Failed to parse a JSON configuration value.
    #[error("invalid configuration: {message}")]
    Config { message: String },
}

impl From<polars::prelude::PolarsError> for EpiError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for EpiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config {
            message: err.to_string(),
        }
    }
}

/// Result type for aggregation operations.
pub type Result<T> = std::result::Result<T, EpiError>;
