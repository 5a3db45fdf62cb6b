//! Configuration options for the aggregation functions.

use serde::{Deserialize, Serialize};

/// Column names of the patient-year table.
///
/// Defaults match the standard extract: `no_comorbidities`, `sum_costs`,
/// `year`, `classes`, `agg_indices`, `age` and `age_bin`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EpiColumns {
    /// Number of chronic conditions in the patient-year.
    pub comorbidity_count: String,
    /// Total cost of the patient-year.
    pub costs: String,
    /// Calendar year of the record.
    pub year: String,
    /// List of chronic-condition labels.
    pub classes: String,
    /// List of cost-center labels.
    pub cost_centers: String,
    /// Age in whole years.
    pub age: String,
    /// Age-bin label, as written by `assign_age_bins`.
    pub age_bin: String,
}

impl Default for EpiColumns {
    fn default() -> Self {
        Self {
            comorbidity_count: "no_comorbidities".to_string(),
            costs: "sum_costs".to_string(),
            year: "year".to_string(),
            classes: "classes".to_string(),
            cost_centers: "agg_indices".to_string(),
            age: "age".to_string(),
            age_bin: "age_bin".to_string(),
        }
    }
}

/// Options for the category breakdown report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakdownOptions {
    /// Restrict counts and spending to this year.
    pub year: Option<i64>,
    /// Column names.
    pub columns: EpiColumns,
}

impl BreakdownOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_year(mut self, year: i64) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_columns(mut self, columns: EpiColumns) -> Self {
        self.columns = columns;
        self
    }
}

/// Options for age-adjusted prevalence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustmentOptions {
    /// Restrict the population to this year.
    pub year: Option<i64>,
    /// Column names.
    pub columns: EpiColumns,
}

impl AdjustmentOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_year(mut self, year: i64) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_columns(mut self, columns: EpiColumns) -> Self {
        self.columns = columns;
        self
    }
}
