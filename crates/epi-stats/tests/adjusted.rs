//! Tests for crude and age-adjusted prevalence.

mod common;

use common::{binned_frame, list_column};
use epi_stats::{
    AdjustmentOptions, AgeBins, AgeWeights, EpiColumns, EpiError, PrevalenceSelection,
    age_adjusted_frequency, assign_age_bins, comorbidity_indicator, prevalence,
};
use polars::prelude::*;

fn weights(young: f64, old: f64) -> AgeWeights {
    [("young", young), ("old", old)].into_iter().collect()
}

#[test]
fn weights_stratum_prevalence() {
    let df = binned_frame();
    let result = age_adjusted_frequency(
        &df,
        &PrevalenceSelection::comorbidities(["diabetes"]),
        &weights(0.3, 0.7),
        &AdjustmentOptions::default(),
    )
    .unwrap();

    // young 1/4, old 3/4
    assert!((result.raw - 0.5).abs() < 1e-12);
    assert!((result.adjusted - (0.25 * 0.3 + 0.75 * 0.7)).abs() < 1e-12);

    assert_eq!(result.strata.len(), 2);
    assert_eq!(result.strata[0].label, "young");
    assert_eq!(result.strata[0].n, 4);
    assert_eq!(result.strata[0].cases, 1);
    assert_eq!(result.strata[1].cases, 3);
}

#[test]
fn equal_stratum_prevalence_scales_with_total_weight() {
    let df = binned_frame();
    // The empty condition set selects every row: both strata are at 1.0.
    let selection = PrevalenceSelection::comorbidities(Vec::<String>::new());

    let result = age_adjusted_frequency(&df, &selection, &weights(0.5, 0.5), &AdjustmentOptions::default())
        .unwrap();
    assert!((result.adjusted - 1.0).abs() < 1e-12);

    let result = age_adjusted_frequency(&df, &selection, &weights(2.0, 3.0), &AdjustmentOptions::default())
        .unwrap();
    assert!((result.adjusted - 5.0).abs() < 1e-12);
    assert!((result.raw - 1.0).abs() < 1e-12);
}

#[test]
fn indicator_and_comorbidity_selection_agree() {
    let df = binned_frame();
    let indicator = comorbidity_indicator(&df, &["diabetes"], &EpiColumns::default()).unwrap();
    let options = AdjustmentOptions::default();

    let by_indicator = age_adjusted_frequency(
        &df,
        &PrevalenceSelection::Indicator(indicator),
        &weights(0.4, 0.6),
        &options,
    )
    .unwrap();
    let by_conditions = age_adjusted_frequency(
        &df,
        &PrevalenceSelection::comorbidities(["diabetes"]),
        &weights(0.4, 0.6),
        &options,
    )
    .unwrap();

    assert_eq!(by_indicator.as_tuple(), by_conditions.as_tuple());
}

#[test]
fn year_filter_keeps_indicator_aligned() {
    let df = binned_frame();
    let indicator = comorbidity_indicator(&df, &["diabetes"], &EpiColumns::default()).unwrap();
    let options = AdjustmentOptions::new().with_year(2016);

    let result = age_adjusted_frequency(
        &df,
        &PrevalenceSelection::Indicator(indicator),
        &weights(0.5, 0.5),
        &options,
    )
    .unwrap();

    // 2016: young has no diabetes (2 rows), old has 1 of 2.
    assert!((result.raw - 0.25).abs() < 1e-12);
    assert!((result.adjusted - 0.25).abs() < 1e-12);
    assert_eq!(result.strata[0].n, 2);
    assert_eq!(result.strata[1].cases, 1);
}

#[test]
fn raw_prevalence_matches_crude_prevalence() {
    let df = binned_frame();
    let indicator = comorbidity_indicator(&df, &["copd"], &EpiColumns::default()).unwrap();
    let crude = prevalence(&df, &indicator).unwrap();

    let result = age_adjusted_frequency(
        &df,
        &PrevalenceSelection::comorbidities(["copd"]),
        &weights(0.5, 0.5),
        &AdjustmentOptions::default(),
    )
    .unwrap();
    assert_eq!(result.raw, crude);
    assert_eq!(crude, 0.25);
}

#[test]
fn empty_age_bin_is_an_error() {
    let df = binned_frame();
    let weights: AgeWeights = [("young", 0.3), ("middle", 0.3), ("old", 0.4)].into_iter().collect();
    let err = age_adjusted_frequency(
        &df,
        &PrevalenceSelection::comorbidities(["diabetes"]),
        &weights,
        &AdjustmentOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, EpiError::EmptyAgeBin { label } if label == "middle"));
}

#[test]
fn empty_population_is_an_error() {
    let df = binned_frame();
    let err = age_adjusted_frequency(
        &df,
        &PrevalenceSelection::comorbidities(["diabetes"]),
        &weights(0.5, 0.5),
        &AdjustmentOptions::new().with_year(1990),
    )
    .unwrap_err();
    assert!(matches!(err, EpiError::EmptyPopulation));
}

#[test]
fn misaligned_indicator_is_an_error() {
    let df = binned_frame();
    let short = BooleanChunked::from_slice("flag".into(), &[true, false]);
    let err = age_adjusted_frequency(
        &df,
        &PrevalenceSelection::Indicator(short),
        &weights(0.5, 0.5),
        &AdjustmentOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, EpiError::IndicatorLength { expected: 8, actual: 2 }));
}

#[test]
fn missing_age_bin_column_is_an_error() {
    let df = binned_frame().drop("age_bin").unwrap();
    let err = age_adjusted_frequency(
        &df,
        &PrevalenceSelection::comorbidities(["diabetes"]),
        &weights(0.5, 0.5),
        &AdjustmentOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, EpiError::ColumnNotFound { column } if column == "age_bin"));
}

#[test]
fn bins_ages_then_adjusts() {
    let mut df = df! {
        "age" => [25i64, 30, 70, 80, 95],
    }
    .unwrap();
    df.with_column(list_column(
        "classes",
        &[&["asthma"], &[], &["asthma", "chf"], &["chf"], &["asthma"]],
    ))
    .unwrap();

    let bins = AgeBins::new(["young", "old"], [(18, 65), (65, 90)]).unwrap();
    let binned = assign_age_bins(&df, &bins, &EpiColumns::default()).unwrap();
    let weights = AgeWeights::from_json_str(
        r#"[{"label": "young", "weight": 0.6}, {"label": "old", "weight": 0.4}]"#,
    )
    .unwrap();

    let result = age_adjusted_frequency(
        &binned,
        &PrevalenceSelection::comorbidities(["asthma"]),
        &weights,
        &AdjustmentOptions::default(),
    )
    .unwrap();

    // Age 95 falls outside both bins: it counts toward the crude rate only.
    assert!((result.raw - 0.6).abs() < 1e-12);
    assert!((result.adjusted - (0.5 * 0.6 + 0.5 * 0.4)).abs() < 1e-12);
}

#[test]
fn strata_frame_lists_weights() {
    let df = binned_frame();
    let result = age_adjusted_frequency(
        &df,
        &PrevalenceSelection::comorbidities(["diabetes"]),
        &weights(0.3, 0.7),
        &AdjustmentOptions::default(),
    )
    .unwrap();
    let frame = result.strata_frame().unwrap();
    assert_eq!(frame.shape(), (2, 4));
    let adjusted: Vec<Option<f64>> = frame
        .column("adjusted")
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .collect();
    assert!((adjusted[0].unwrap() - 0.075).abs() < 1e-12);
}
