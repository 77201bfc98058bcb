//! Pairwise Pearson correlation of numeric columns
//!
//! Builds a standardized data matrix Z and computes R = Z^T * Z, which is
//! far cheaper than per-pair passes once the column count grows. The result
//! is heatmap-ready: ordered column names plus a dense square matrix.

use anyhow::{bail, Result};
use faer::Mat;
use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;

/// Dense correlation matrix over the retained numeric columns
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationMatrix {
    /// Column names in matrix order
    pub columns: Vec<String>,
    /// Row-major square matrix; values[i][j] is corr(columns[i], columns[j])
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn size(&self) -> usize {
        self.columns.len()
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }
}

/// A pair of columns whose correlation magnitude exceeds a threshold
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelatedPair {
    pub feature1: String,
    pub feature2: String,
    pub correlation: f64,
}

/// Compute the Pearson correlation matrix of all numeric columns.
///
/// Columns are standardized over their non-null rows; nulls contribute zero
/// after centering. Constant and all-null columns carry no correlation
/// signal and are dropped from the result. The target column may be
/// excluded by name.
///
/// # Arguments
/// * `df` - The input DataFrame
/// * `exclude` - Optional column to leave out (typically the target)
///
/// # Returns
/// The matrix over retained columns; fails when fewer than two remain.
pub fn correlation_matrix(df: &DataFrame, exclude: Option<&str>) -> Result<CorrelationMatrix> {
    let float_columns: Vec<(String, Column)> = df
        .get_columns()
        .iter()
        .filter(|col| col.dtype().is_primitive_numeric() && Some(col.name().as_str()) != exclude)
        .filter_map(|col| {
            col.cast(&DataType::Float64)
                .ok()
                .map(|c| (col.name().to_string(), c))
        })
        .collect();

    let n_rows = df.height();
    if n_rows == 0 {
        bail!("Cannot compute correlations over an empty DataFrame");
    }

    // Standardize each column in parallel; None marks a column with no signal
    let standardized: Vec<Option<(String, Vec<f64>)>> = float_columns
        .par_iter()
        .map(|(name, col)| {
            let ca = col.f64().ok()?;

            let mut sum = 0.0;
            let mut n_valid = 0usize;
            for val in ca.iter().flatten() {
                sum += val;
                n_valid += 1;
            }
            if n_valid < 2 {
                return None;
            }
            let mean = sum / n_valid as f64;

            let mut sum_sq_dev = 0.0;
            for val in ca.iter().flatten() {
                let dev = val - mean;
                sum_sq_dev += dev * dev;
            }
            let std = (sum_sq_dev / n_valid as f64).sqrt();
            if std == 0.0 {
                return None;
            }

            let scale = 1.0 / (std * (n_valid as f64).sqrt());
            let z: Vec<f64> = ca
                .iter()
                .map(|val| match val {
                    Some(x) => (x - mean) * scale,
                    None => 0.0,
                })
                .collect();

            Some((name.clone(), z))
        })
        .collect();

    let retained: Vec<(String, Vec<f64>)> = standardized.into_iter().flatten().collect();
    if retained.len() < 2 {
        bail!(
            "Need at least two numeric columns with variation, found {}",
            retained.len()
        );
    }

    let n_cols = retained.len();
    let mut z = Mat::<f64>::zeros(n_rows, n_cols);
    for (col_idx, (_, col_data)) in retained.iter().enumerate() {
        for (row_idx, &val) in col_data.iter().enumerate() {
            z[(row_idx, col_idx)] = val;
        }
    }

    let corr = z.transpose() * &z;

    let values: Vec<Vec<f64>> = (0..n_cols)
        .map(|i| (0..n_cols).map(|j| corr[(i, j)]).collect())
        .collect();

    Ok(CorrelationMatrix {
        columns: retained.into_iter().map(|(name, _)| name).collect(),
        values,
    })
}

/// Extract the upper-triangle pairs above a correlation magnitude threshold,
/// sorted by absolute correlation descending.
pub fn extract_correlated_pairs(matrix: &CorrelationMatrix, threshold: f64) -> Vec<CorrelatedPair> {
    let n = matrix.size();
    let mut pairs = Vec::new();

    for i in 0..n {
        for j in (i + 1)..n {
            let corr = matrix.get(i, j);
            if corr.abs() > threshold && !corr.is_nan() {
                pairs.push(CorrelatedPair {
                    feature1: matrix.columns[i].clone(),
                    feature2: matrix.columns[j].clone(),
                    correlation: corr,
                });
            }
        }
    }

    pairs.sort_by(|a, b| {
        b.correlation
            .abs()
            .partial_cmp(&a.correlation.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    pairs
}
