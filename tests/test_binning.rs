//! Integration tests for monotonic WOE/IV binning

mod common;

use polars::prelude::*;
use scorekit::pipeline::binning::{
    bin_features, mono_bin, BinningError, BinningOptions, DuplicateEdges,
};

fn default_options() -> BinningOptions {
    BinningOptions::default()
}

#[test]
fn test_rising_feature_bins_monotonically() {
    let df = common::create_test_dataframe();
    let labels = df.column("target").unwrap().as_materialized_series();
    let predictor = df.column("feature_up").unwrap().as_materialized_series();

    let result = mono_bin(labels, predictor, &default_options()).unwrap();

    // Bad rate must move in one direction across buckets
    let rates: Vec<f64> = result.buckets.iter().map(|b| b.bad_rate).collect();
    let rising = rates.windows(2).all(|w| w[1] >= w[0]);
    let falling = rates.windows(2).all(|w| w[1] <= w[0]);
    assert!(rising || falling);

    // Every labeled row lands in a bucket
    let total: u64 = result.buckets.iter().map(|b| b.total).sum();
    assert_eq!(total, 10);
}

#[test]
fn test_opposite_directions_same_iv() {
    let df = common::create_test_dataframe();
    let labels = df.column("target").unwrap().as_materialized_series();
    let up = df.column("feature_up").unwrap().as_materialized_series();
    let down = df.column("feature_down").unwrap().as_materialized_series();

    // Two buckets keep both classes present in every bucket, so the IV
    // stays finite and the values are comparable
    let options = BinningOptions {
        initial_bins: 2,
        ..Default::default()
    };
    let result_up = mono_bin(labels, up, &options).unwrap();
    let result_down = mono_bin(labels, down, &options).unwrap();

    // Mirrored predictors separate the classes equally well
    assert!(result_up.iv_sum.is_finite());
    assert!((result_up.iv_sum - result_down.iv_sum).abs() < 1e-9);
}

#[test]
fn test_cut_points_bracket_reals() {
    let df = common::create_test_dataframe();
    let labels = df.column("target").unwrap().as_materialized_series();
    let predictor = df.column("feature_up").unwrap().as_materialized_series();

    let result = mono_bin(labels, predictor, &default_options()).unwrap();

    assert_eq!(result.cut_points.len(), result.buckets.len() + 1);
    assert_eq!(result.cut_points[0], f64::NEG_INFINITY);
    assert_eq!(*result.cut_points.last().unwrap(), f64::INFINITY);
    assert!(result.cut_points.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_null_predictors_excluded_from_buckets() {
    let df = common::create_test_dataframe();
    let labels = df.column("target").unwrap().as_materialized_series();
    let predictor = df.column("feature_missing").unwrap().as_materialized_series();

    let result = mono_bin(labels, predictor, &default_options()).unwrap();

    let binned: u64 = result.buckets.iter().map(|b| b.total).sum();
    assert_eq!(binned, 8);
}

#[test]
fn test_constant_predictor_fails() {
    let labels = Series::new("y".into(), vec![0i32, 1, 0, 1]);
    let predictor = Series::new("x".into(), vec![5.0f64; 4]);

    let result = mono_bin(&labels, &predictor, &default_options());
    assert!(matches!(
        result,
        Err(BinningError::DuplicateEdges { .. }) | Err(BinningError::NoMonotonicFit { .. })
    ));
}

#[test]
fn test_drop_policy_tolerates_repeated_values() {
    let labels = Series::new("y".into(), vec![0i32, 0, 0, 0, 0, 0, 1, 1]);
    let predictor = Series::new("x".into(), vec![1.0f64, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 2.0]);
    let options = BinningOptions {
        duplicate_edges: DuplicateEdges::Drop,
        ..Default::default()
    };

    let result = mono_bin(&labels, &predictor, &options).unwrap();
    assert!(result.buckets.len() >= 2);
}

#[test]
fn test_bin_features_sorted_by_iv() {
    let df = common::create_test_dataframe();
    let df = df.drop("label").unwrap();

    let results = bin_features(&df, "target", &default_options()).unwrap();

    assert!(!results.is_empty());
    for w in results.windows(2) {
        let a = w[0].binning.iv_sum;
        let b = w[1].binning.iv_sum;
        assert!(a >= b || a.is_nan() || b.is_nan());
    }
    // The target itself is never binned as a feature
    assert!(results.iter().all(|fb| fb.feature != "target"));
}

#[test]
fn test_string_label_column_accepted() {
    let df = common::create_test_dataframe();
    let labels = df.column("label").unwrap().as_materialized_series();
    let predictor = df.column("feature_up").unwrap().as_materialized_series();

    // Finite-IV comparison needs both classes in every bucket
    let options = BinningOptions {
        initial_bins: 2,
        ..Default::default()
    };
    let with_strings = mono_bin(labels, predictor, &options).unwrap();

    let numeric = df.column("target").unwrap().as_materialized_series();
    let with_numeric = mono_bin(numeric, predictor, &options).unwrap();

    assert_eq!(with_strings.buckets.len(), with_numeric.buckets.len());
    assert!(with_strings.iv_sum.is_finite());
    assert!((with_strings.iv_sum - with_numeric.iv_sum).abs() < 1e-12);
}
