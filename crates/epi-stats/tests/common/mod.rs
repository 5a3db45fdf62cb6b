//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use polars::prelude::*;

/// Builds a list-of-strings column, one inner list per row.
pub fn list_column(name: &str, rows: &[&[&str]]) -> Column {
    let rows: Vec<Series> = rows
        .iter()
        .map(|row| Series::new(PlSmallStr::EMPTY, row.to_vec()))
        .collect();
    Series::new(name.into(), rows).into()
}

/// Four patient-years in two categories: A (costs 10, 20, 30; 0, 2, 3
/// conditions) and B (cost 40; 1 condition).
pub fn two_category_frame() -> DataFrame {
    df! {
        "region" => ["A", "A", "A", "B"],
        "year" => [2015i64, 2016, 2016, 2016],
        "no_comorbidities" => [0i64, 2, 3, 1],
        "sum_costs" => [10.0, 20.0, 30.0, 40.0],
    }
    .unwrap()
}

/// Eight patient-years, four per age bin, with chronic-condition lists.
///
/// `young`: one of four has diabetes. `old`: three of four have diabetes.
pub fn binned_frame() -> DataFrame {
    let mut df = df! {
        "age_bin" => ["young", "young", "young", "young", "old", "old", "old", "old"],
        "year" => [2015i64, 2015, 2016, 2016, 2015, 2015, 2016, 2016],
    }
    .unwrap();
    df.with_column(list_column(
        "classes",
        &[
            &["diabetes"],
            &[],
            &["copd"],
            &[],
            &["diabetes", "copd"],
            &["diabetes"],
            &["diabetes", "chf"],
            &[],
        ],
    ))
    .unwrap();
    df
}
