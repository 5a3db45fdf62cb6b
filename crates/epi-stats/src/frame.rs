//! Typed column access over a patient-year `DataFrame`.

use polars::prelude::{Column, DataFrame, DataType, IntoLazy, col, lit};

use crate::error::{EpiError, Result};

/// Looks up a column, mapping a miss to [`EpiError::ColumnNotFound`].
pub(crate) fn require_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name).map_err(|_| EpiError::ColumnNotFound {
        column: name.to_string(),
    })
}

/// Reads a column as `i64` values, casting from any numeric dtype.
pub(crate) fn i64_values(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>> {
    let column = require_column(df, name)?.cast(&DataType::Int64)?;
    Ok(column.i64()?.into_iter().collect())
}

/// Reads a column as `f64` values, casting from any numeric dtype.
///
/// The cast is strict: a value that does not parse as a number is an error
/// rather than a null.
pub(crate) fn f64_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = require_column(df, name)?.strict_cast(&DataType::Float64)?;
    Ok(column.f64()?.into_iter().collect())
}

/// Reads a column as string labels.
pub(crate) fn label_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = require_column(df, name)?.cast(&DataType::String)?;
    Ok(column
        .str()?
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect())
}

/// Keeps the rows whose year column equals `year`; `None` keeps every row.
pub(crate) fn filter_year(df: &DataFrame, year_column: &str, year: Option<i64>) -> Result<DataFrame> {
    let Some(year) = year else {
        return Ok(df.clone());
    };
    require_column(df, year_column)?;
    let filtered = df
        .clone()
        .lazy()
        .filter(col(year_column).eq(lit(year)))
        .collect()?;
    Ok(filtered)
}
