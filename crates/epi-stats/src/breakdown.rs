//! Multimorbidity breakdown by category.
//!
//! For every value of a category column the report gives the record count,
//! how many records carry more than one and more than two chronic conditions,
//! and the category's spending with its share of the population's spending.

use std::collections::HashMap;
use std::fmt;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use epi_common::{any_to_label, format_decimal, round_to};
use polars::prelude::{Column, DataFrame, NamedFrom, Series, SortOptions};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EpiError, Result};
use crate::frame::{f64_values, filter_year, require_column};
use crate::options::BreakdownOptions;

/// Report column headers, in output order.
pub const COL_N: &str = "n";
pub const COL_OVER_ONE: &str = ">1 chronic condition";
pub const COL_OVER_ONE_PCT: &str = ">1 %";
pub const COL_OVER_TWO: &str = ">2 chronic condition";
pub const COL_OVER_TWO_PCT: &str = ">2 %";
pub const COL_SPENDING: &str = "Total Spending ($)";
pub const COL_SPENDING_PCT: &str = "Yearly Spending %";

pub const REPORT_COLUMNS: [&str; 7] = [
    COL_N,
    COL_OVER_ONE,
    COL_OVER_ONE_PCT,
    COL_OVER_TWO,
    COL_OVER_TWO_PCT,
    COL_SPENDING,
    COL_SPENDING_PCT,
];

/// Category value a report row is indexed by.
///
/// Null keys in the category column (for instance ages that fell outside
/// every bin) are grouped under `Unknown`, which sorts last.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryKey {
    Value(String),
    Unknown,
}

impl CategoryKey {
    pub fn as_label(&self) -> Option<&str> {
        match self {
            CategoryKey::Value(label) => Some(label),
            CategoryKey::Unknown => None,
        }
    }
}

impl From<Option<String>> for CategoryKey {
    fn from(value: Option<String>) -> Self {
        value.map_or(CategoryKey::Unknown, CategoryKey::Value)
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryKey::Value(label) => f.write_str(label),
            CategoryKey::Unknown => f.write_str("Unknown"),
        }
    }
}

/// One row of the breakdown report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownRow {
    pub category: CategoryKey,
    pub n: usize,
    pub over_one: usize,
    pub over_one_pct: f64,
    pub over_two: usize,
    pub over_two_pct: f64,
    /// Spending truncated to whole dollars.
    pub total_spending: i64,
    pub yearly_spending_pct: f64,
}

/// Breakdown report, one row per category in ascending order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownReport {
    pub category_column: String,
    pub year: Option<i64>,
    pub rows: Vec<BreakdownRow>,
}

impl BreakdownReport {
    pub fn rows(&self) -> &[BreakdownRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row for a category label.
    pub fn get(&self, category: &str) -> Option<&BreakdownRow> {
        self.rows
            .iter()
            .find(|row| row.category.as_label() == Some(category))
    }

    /// Row for the null-key group, if the category column had nulls.
    pub fn unknown(&self) -> Option<&BreakdownRow> {
        self.rows
            .iter()
            .find(|row| row.category == CategoryKey::Unknown)
    }

    /// Converts the report to a `DataFrame` whose first column holds the
    /// category labels (null for the unknown group).
    pub fn to_frame(&self) -> Result<DataFrame> {
        let labels: Vec<Option<&str>> = self.rows.iter().map(|r| r.category.as_label()).collect();
        let counts = |f: fn(&BreakdownRow) -> usize| -> Vec<u64> {
            self.rows.iter().map(|r| f(r) as u64).collect()
        };
        let shares = |f: fn(&BreakdownRow) -> f64| -> Vec<f64> { self.rows.iter().map(f).collect() };
        let spending: Vec<i64> = self.rows.iter().map(|r| r.total_spending).collect();

        let columns: Vec<Column> = vec![
            Series::new(self.category_column.as_str().into(), labels).into(),
            Series::new(COL_N.into(), counts(|r| r.n)).into(),
            Series::new(COL_OVER_ONE.into(), counts(|r| r.over_one)).into(),
            Series::new(COL_OVER_ONE_PCT.into(), shares(|r| r.over_one_pct)).into(),
            Series::new(COL_OVER_TWO.into(), counts(|r| r.over_two)).into(),
            Series::new(COL_OVER_TWO_PCT.into(), shares(|r| r.over_two_pct)).into(),
            Series::new(COL_SPENDING.into(), spending).into(),
            Series::new(COL_SPENDING_PCT.into(), shares(|r| r.yearly_spending_pct)).into(),
        ];
        Ok(DataFrame::new(columns)?)
    }

    /// Renders the report as a text table.
    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        let mut header = vec![header_cell(&self.category_column)];
        header.extend(REPORT_COLUMNS.iter().map(|label| header_cell(label)));
        table.set_header(header);
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .apply_modifier(UTF8_SOLID_INNER_BORDERS)
            .set_content_arrangement(ContentArrangement::Dynamic);
        for index in 1..=REPORT_COLUMNS.len() {
            if let Some(column) = table.column_mut(index) {
                column.set_cell_alignment(CellAlignment::Right);
            }
        }
        for row in &self.rows {
            table.add_row(vec![
                Cell::new(&row.category),
                Cell::new(row.n),
                Cell::new(row.over_one),
                Cell::new(format_decimal(row.over_one_pct)),
                Cell::new(row.over_two),
                Cell::new(format_decimal(row.over_two_pct)),
                Cell::new(row.total_spending),
                Cell::new(format_decimal(row.yearly_spending_pct)),
            ]);
        }
        table
    }
}

impl fmt::Display for BreakdownReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_table())
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

#[derive(Debug, Default)]
struct Tally {
    n: usize,
    over_one: usize,
    over_two: usize,
    spending: f64,
}

/// Unique values of the category column, ascending, nulls last.
fn sorted_categories(df: &DataFrame, category_column: &str) -> Result<Vec<CategoryKey>> {
    let series = require_column(df, category_column)?.as_materialized_series();
    let unique = series
        .unique()?
        .sort(SortOptions::default().with_nulls_last(true))?;
    (0..unique.len())
        .map(|idx| Ok(CategoryKey::from(any_to_label(unique.get(idx)?))))
        .collect()
}

/// Category key of every row.
fn row_categories(df: &DataFrame, category_column: &str) -> Result<Vec<CategoryKey>> {
    let series = require_column(df, category_column)?.as_materialized_series();
    (0..series.len())
        .map(|idx| Ok(CategoryKey::from(any_to_label(series.get(idx)?))))
        .collect()
}

/// Builds the multimorbidity breakdown of `df` by `category_column`.
///
/// Categories are taken from the whole table; with `options.year` set, the
/// counts and spending only use rows of that year, and a category without
/// rows in that year is an error. Spending shares are relative to the total
/// spending of the (year-filtered) population.
pub fn epi_rows(
    df: &DataFrame,
    category_column: &str,
    options: &BreakdownOptions,
) -> Result<BreakdownReport> {
    let columns = &options.columns;
    let categories = sorted_categories(df, category_column)?;
    let population = filter_year(df, &columns.year, options.year)?;

    let keys = row_categories(&population, category_column)?;
    let comorbidities = f64_values(&population, &columns.comorbidity_count)?;
    // NaN and infinite costs are skipped like nulls.
    let costs: Vec<Option<f64>> = f64_values(&population, &columns.costs)?
        .into_iter()
        .map(|cost| cost.filter(|c| c.is_finite()))
        .collect();

    let mut tallies: HashMap<CategoryKey, Tally> = HashMap::new();
    for ((key, count), cost) in keys.into_iter().zip(comorbidities).zip(&costs) {
        let tally = tallies.entry(key).or_default();
        tally.n += 1;
        if count.is_some_and(|c| c > 1.0) {
            tally.over_one += 1;
        }
        if count.is_some_and(|c| c > 2.0) {
            tally.over_two += 1;
        }
        tally.spending += cost.unwrap_or(0.0);
    }
    let total_spending: f64 = costs.iter().flatten().sum();

    let mut rows = Vec::with_capacity(categories.len());
    for category in categories {
        let tally = tallies.remove(&category).unwrap_or_default();
        debug!(
            category = %category,
            n = tally.n,
            year = ?options.year,
            "breakdown category"
        );
        if tally.n == 0 {
            return Err(EpiError::EmptyCategory {
                category: category.to_string(),
            });
        }
        if total_spending == 0.0 {
            return Err(EpiError::ZeroTotalSpending);
        }
        let n = tally.n as f64;
        let spending = tally.spending.trunc() as i64;
        rows.push(BreakdownRow {
            over_one_pct: round_to(tally.over_one as f64 / n * 100.0, 1),
            over_two_pct: round_to(tally.over_two as f64 / n * 100.0, 1),
            yearly_spending_pct: round_to(spending as f64 / total_spending * 100.0, 2),
            category,
            n: tally.n,
            over_one: tally.over_one,
            over_two: tally.over_two,
            total_spending: spending,
        });
    }

    Ok(BreakdownReport {
        category_column: category_column.to_string(),
        year: options.year,
        rows,
    })
}
