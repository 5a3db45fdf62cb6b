//! Epidemiological aggregation over patient-year tables.
//!
//! Stateless helpers that take a Polars `DataFrame` with one row per
//! patient-year and derive summary statistics from it.
//!
//! # Overview
//!
//! This crate provides:
//! - **Proportion intervals**: Wald confidence intervals rendered as `"p (lower-upper)"`
//! - **Breakdown report**: multimorbidity counts and spending shares per category
//! - **Age binning**: labelled age intervals and an `age_bin` column builder
//! - **Indicators**: per-row superset tests over condition and cost-center lists
//! - **Prevalence**: crude and age-adjusted (direct standardization)
//!
//! # Example
//!
//! ```ignore
//! use epi_stats::{
//!     AdjustmentOptions, AgeBins, AgeWeights, EpiColumns, PrevalenceSelection,
//!     age_adjusted_frequency, assign_age_bins,
//! };
//!
//! let bins = AgeBins::new(["18-44", "45-64", "65+"], [(18, 45), (45, 65), (65, 120)])?;
//! let binned = assign_age_bins(&patient_years, &bins, &EpiColumns::default())?;
//!
//! let weights: AgeWeights = [("18-44", 0.5), ("45-64", 0.3), ("65+", 0.2)].into_iter().collect();
//! let result = age_adjusted_frequency(
//!     &binned,
//!     &PrevalenceSelection::comorbidities(["diabetes"]),
//!     &weights,
//!     &AdjustmentOptions::new().with_year(2016),
//! )?;
//! println!("crude {:.3}, adjusted {:.3}", result.raw, result.adjusted);
//! ```
//!
//! # Failure policy
//!
//! Empty strata, zero spending and invalid proportions are returned as
//! [`EpiError`] values instead of producing NaN or infinity. The one silent
//! path is an age outside every bin, which becomes a missing label.

mod adjusted;
mod binning;
mod breakdown;
mod error;
mod frame;
mod indicator;
mod interval;
mod options;
mod prevalence;

// Configuration
pub use options::{AdjustmentOptions, BreakdownOptions, EpiColumns};

// Error type
pub use error::{EpiError, Result};

// Proportion intervals
pub use interval::{
    DEFAULT_ALPHA, ProportionInterval, prop_error, prop_error_pct, wald_interval, z_critical,
};

// Breakdown report
pub use breakdown::{
    BreakdownReport, BreakdownRow, COL_N, COL_OVER_ONE, COL_OVER_ONE_PCT, COL_OVER_TWO,
    COL_OVER_TWO_PCT, COL_SPENDING, COL_SPENDING_PCT, CategoryKey, REPORT_COLUMNS, epi_rows,
};

// Age binning
pub use binning::{AgeBin, AgeBins, age_bin, assign_age_bins};

// Indicators and prevalence
pub use indicator::{comorbidity_indicator, cost_center_indicator, superset_indicator};
pub use prevalence::prevalence;

// Age adjustment
pub use adjusted::{
    AdjustedPrevalence, AgeWeight, AgeWeights, PrevalenceSelection, StratumPrevalence,
    age_adjusted_frequency,
};
