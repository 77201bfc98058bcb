//! Integration tests for the correlation matrix and pair extraction

mod common;

use polars::prelude::*;
use scorekit::pipeline::correlation::{correlation_matrix, extract_correlated_pairs};

#[test]
fn test_mirrored_features_fully_anticorrelated() {
    let df = common::create_test_dataframe();
    let matrix = correlation_matrix(&df, Some("target")).unwrap();

    let up = matrix.columns.iter().position(|c| c == "feature_up").unwrap();
    let down = matrix
        .columns
        .iter()
        .position(|c| c == "feature_down")
        .unwrap();

    assert!((matrix.get(up, down) + 1.0).abs() < 1e-9);
}

#[test]
fn test_pairs_above_threshold_found() {
    let df = common::create_test_dataframe();
    let matrix = correlation_matrix(&df, Some("target")).unwrap();
    let pairs = extract_correlated_pairs(&matrix, 0.95);

    assert!(pairs
        .iter()
        .any(|p| p.feature1 == "feature_up" && p.feature2 == "feature_down"));
}

#[test]
fn test_excluded_column_absent() {
    let df = common::create_test_dataframe();
    let matrix = correlation_matrix(&df, Some("target")).unwrap();
    assert!(!matrix.columns.contains(&"target".to_string()));
}

#[test]
fn test_matrix_on_random_data_stays_bounded() {
    let df = common::create_large_test_dataframe(200, 8);
    let matrix = correlation_matrix(&df, Some("target")).unwrap();

    for i in 0..matrix.size() {
        for j in 0..matrix.size() {
            let r = matrix.get(i, j);
            assert!(r >= -1.0 - 1e-9 && r <= 1.0 + 1e-9, "r({}, {}) = {}", i, j, r);
        }
    }
}

#[test]
fn test_single_numeric_column_errors() {
    let df = df! {
        "only" => [1.0f64, 2.0, 3.0],
        "text" => ["a", "b", "c"],
    }
    .unwrap();

    assert!(correlation_matrix(&df, None).is_err());
}
