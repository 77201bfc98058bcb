//! Shared test utilities and fixture generators

#![allow(dead_code)]

use polars::prelude::*;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a test DataFrame with known characteristics
///
/// This DataFrame includes:
/// - `target`: Binary target column (0/1)
/// - `feature_up`: Bad rate rises with the feature value
/// - `feature_down`: Bad rate falls with the feature value
/// - `feature_noise`: No relation to the target
/// - `feature_missing`: Numeric feature with nulls
/// - `label`: The same target expressed as "good"/"bad" strings
pub fn create_test_dataframe() -> DataFrame {
    df! {
        "target" => [0i32, 0, 0, 0, 1, 0, 1, 1, 1, 1],
        "feature_up" => [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0],
        "feature_down" => [10.0f64, 9.0, 8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0],
        "feature_noise" => [5.0f64, 1.0, 9.0, 2.0, 8.0, 3.0, 7.0, 4.0, 6.0, 5.5],
        "feature_missing" => [Some(1.0f64), None, Some(3.0), Some(4.0), Some(5.0), Some(6.0), None, Some(8.0), Some(9.0), Some(10.0)],
        "label" => ["good", "good", "good", "good", "bad", "good", "bad", "bad", "bad", "bad"],
    }
    .unwrap()
}

/// Create a scored DataFrame for KS/lift and ROC testing.
/// The score separates the classes perfectly.
pub fn create_scored_dataframe() -> DataFrame {
    df! {
        "target" => [1i32, 1, 1, 0, 0, 0],
        "score" => [0.9f64, 0.8, 0.7, 0.3, 0.2, 0.1],
    }
    .unwrap()
}

/// Create a larger random DataFrame for stress tests
pub fn create_large_test_dataframe(rows: usize, cols: usize) -> DataFrame {
    use rand::Rng;
    let mut rng = rand::thread_rng();

    let mut columns: Vec<Column> = Vec::with_capacity(cols + 1);

    let target: Vec<i32> = (0..rows).map(|_| rng.gen_range(0..2)).collect();
    columns.push(Column::new("target".into(), target));

    for i in 0..cols {
        let values: Vec<f64> = (0..rows).map(|_| rng.gen::<f64>()).collect();
        columns.push(Column::new(format!("feature_{}", i).into(), values));
    }

    DataFrame::new(columns).unwrap()
}

/// Write a small CSV fixture and return the temp dir with its path.
/// The TempDir must stay alive for the duration of the test.
pub fn write_test_csv() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.csv");

    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "target,feature_up,feature_down,score,comment").unwrap();
    let rows = [
        (0, 1.0, 10.0, 0.1, "ok"),
        (0, 2.0, 9.0, 0.2, ""),
        (0, 3.0, 8.0, 0.15, "ok"),
        (0, 4.0, 7.0, 0.3, "  "),
        (1, 5.0, 6.0, 0.7, "late"),
        (0, 6.0, 5.0, 0.4, "ok"),
        (1, 7.0, 4.0, 0.8, "late"),
        (1, 8.0, 3.0, 0.75, "late"),
        (1, 9.0, 2.0, 0.9, ""),
        (1, 10.0, 1.0, 0.95, "late"),
    ];
    for (target, up, down, score, comment) in rows {
        writeln!(file, "{},{},{},{},{}", target, up, down, score, comment).unwrap();
    }

    (dir, path)
}
