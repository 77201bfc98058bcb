//! Descriptive statistics for numeric columns

use anyhow::{bail, Context, Result};
use polars::prelude::*;
use serde::Serialize;

use crate::pipeline::stats::quantile_sorted;

/// Eight-number summary of one numeric column, computed over non-null rows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    /// Non-null observation count
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (ddof = 1); NaN below two observations
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Summarize a single numeric column.
///
/// # Arguments
/// * `df` - The input DataFrame
/// * `name` - Column to summarize; must have a numeric dtype
///
/// # Returns
/// The summary, or an error for unknown or non-numeric columns. A column
/// with zero non-null values yields a summary of all-NaN statistics.
pub fn summarize_column(df: &DataFrame, name: &str) -> Result<ColumnSummary> {
    let col = df
        .column(name)
        .with_context(|| format!("Column '{}' not found", name))?;

    if !col.dtype().is_primitive_numeric() {
        bail!(
            "Column '{}' has non-numeric type {} and cannot be summarized",
            name,
            col.dtype()
        );
    }

    let values = col.cast(&DataType::Float64)?;
    let mut observed: Vec<f64> = values.f64()?.iter().flatten().collect();
    observed.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let count = observed.len();
    if count == 0 {
        return Ok(ColumnSummary {
            column: name.to_string(),
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            q25: f64::NAN,
            median: f64::NAN,
            q75: f64::NAN,
            max: f64::NAN,
        });
    }

    let mean = observed.iter().sum::<f64>() / count as f64;
    let std = if count < 2 {
        f64::NAN
    } else {
        let ss: f64 = observed.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (count - 1) as f64).sqrt()
    };

    Ok(ColumnSummary {
        column: name.to_string(),
        count,
        mean,
        std,
        min: observed[0],
        q25: quantile_sorted(&observed, 0.25).unwrap_or(f64::NAN),
        median: quantile_sorted(&observed, 0.5).unwrap_or(f64::NAN),
        q75: quantile_sorted(&observed, 0.75).unwrap_or(f64::NAN),
        max: observed[count - 1],
    })
}

/// Summarize every numeric column of a DataFrame, in column order.
/// Non-numeric columns are skipped.
pub fn summarize_all(df: &DataFrame) -> Result<Vec<ColumnSummary>> {
    df.get_columns()
        .iter()
        .filter(|col| col.dtype().is_primitive_numeric())
        .map(|col| summarize_column(df, col.name().as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_of_known_values() {
        let df = df! { "x" => [1.0f64, 2.0, 3.0, 4.0, 5.0] }.unwrap();
        let s = summarize_column(&df, "x").unwrap();

        assert_eq!(s.count, 5);
        assert!((s.mean - 3.0).abs() < 1e-12);
        assert!((s.std - 1.5811388300841898).abs() < 1e-12);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.q25, 2.0);
        assert_eq!(s.median, 3.0);
        assert_eq!(s.q75, 4.0);
        assert_eq!(s.max, 5.0);
    }

    #[test]
    fn test_interpolated_quartiles() {
        let df = df! { "x" => [1.0f64, 2.0, 3.0, 4.0] }.unwrap();
        let s = summarize_column(&df, "x").unwrap();

        assert!((s.q25 - 1.75).abs() < 1e-12);
        assert!((s.median - 2.5).abs() < 1e-12);
        assert!((s.q75 - 3.25).abs() < 1e-12);
    }

    #[test]
    fn test_nulls_excluded_from_count() {
        let df = df! { "x" => [Some(1.0f64), None, Some(3.0)] }.unwrap();
        let s = summarize_column(&df, "x").unwrap();

        assert_eq!(s.count, 2);
        assert!((s.mean - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_all_null_column_is_nan() {
        let df = df! { "x" => [None::<f64>, None] }.unwrap();
        let s = summarize_column(&df, "x").unwrap();

        assert_eq!(s.count, 0);
        assert!(s.mean.is_nan());
        assert!(s.min.is_nan());
    }

    #[test]
    fn test_single_value_std_is_nan() {
        let df = df! { "x" => [7.0f64] }.unwrap();
        let s = summarize_column(&df, "x").unwrap();

        assert_eq!(s.count, 1);
        assert!(s.std.is_nan());
        assert_eq!(s.min, 7.0);
        assert_eq!(s.max, 7.0);
    }

    #[test]
    fn test_non_numeric_rejected() {
        let df = df! { "x" => ["a", "b"] }.unwrap();
        assert!(summarize_column(&df, "x").is_err());
    }

    #[test]
    fn test_summarize_all_skips_text() {
        let df = df! {
            "num" => [1.0f64, 2.0],
            "txt" => ["a", "b"],
            "int" => [1i32, 2],
        }
        .unwrap();

        let summaries = summarize_all(&df).unwrap();
        let names: Vec<&str> = summaries.iter().map(|s| s.column.as_str()).collect();
        assert_eq!(names, vec!["num", "int"]);
    }
}
