//! Row indicators over list columns.
//!
//! A row is flagged when its list contains every label of the query; order
//! and duplicates are ignored on both sides.

use std::collections::HashSet;

use polars::prelude::{BooleanChunked, DataFrame, DataType, NewChunkedArray, PlSmallStr};

use crate::error::Result;
use crate::frame::require_column;
use crate::options::EpiColumns;

/// Flags the rows whose `column` list is a superset of `query`.
///
/// List elements of any scalar dtype are compared by their string form. A
/// null list counts as empty, so it only matches an empty query.
pub fn superset_indicator<S: AsRef<str>>(
    df: &DataFrame,
    column: &str,
    query: &[S],
) -> Result<BooleanChunked> {
    let query: HashSet<&str> = query.iter().map(AsRef::as_ref).collect();
    let lists = require_column(df, column)?.cast(&DataType::List(Box::new(DataType::String)))?;

    let mut flags = Vec::with_capacity(df.height());
    for row in lists.list()? {
        let matched = match row {
            Some(values) => {
                let values = values.str()?;
                let present: HashSet<&str> = values.into_iter().flatten().collect();
                query.is_subset(&present)
            }
            None => query.is_empty(),
        };
        flags.push(matched);
    }

    Ok(BooleanChunked::from_slice(PlSmallStr::from(column), &flags))
}

/// Flags the rows whose chronic-condition list (`columns.classes`) contains
/// every condition.
pub fn comorbidity_indicator<S: AsRef<str>>(
    df: &DataFrame,
    conditions: &[S],
    columns: &EpiColumns,
) -> Result<BooleanChunked> {
    superset_indicator(df, &columns.classes, conditions)
}

/// Flags the rows whose cost-center list (`columns.cost_centers`) contains
/// every index.
pub fn cost_center_indicator<S: AsRef<str>>(
    df: &DataFrame,
    indices: &[S],
    columns: &EpiColumns,
) -> Result<BooleanChunked> {
    superset_indicator(df, &columns.cost_centers, indices)
}
