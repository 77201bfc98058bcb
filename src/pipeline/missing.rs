//! Missing-value profiling across DataFrame columns

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::Serialize;

/// Missing-value summary for a single column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingStat {
    pub column: String,
    pub missing: usize,
    /// Fraction of rows missing, in [0, 1]
    pub missing_rate: f64,
    pub dtype: String,
}

/// Profile missing values across all columns of a DataFrame.
///
/// Returns one entry per column that actually has missing values, sorted
/// ascending by missing count. Fully populated columns are omitted, so an
/// empty result means the frame is complete.
pub fn missing_stats(df: &DataFrame) -> Vec<MissingStat> {
    let height = df.height();
    let mut stats: Vec<MissingStat> = df
        .get_columns()
        .iter()
        .filter(|col| col.null_count() > 0)
        .map(|col| MissingStat {
            column: col.name().to_string(),
            missing: col.null_count(),
            missing_rate: col.null_count() as f64 / height as f64,
            dtype: col.dtype().to_string(),
        })
        .collect();

    stats.sort_by(|a, b| a.missing.cmp(&b.missing));
    stats
}

/// Missing-value summary of one named column, whether or not it has nulls.
pub fn missing_stat_column(df: &DataFrame, name: &str) -> Result<MissingStat> {
    let col = df
        .column(name)
        .with_context(|| format!("Column '{}' not found", name))?;

    let height = df.height();
    let rate = if height == 0 {
        0.0
    } else {
        col.null_count() as f64 / height as f64
    };

    Ok(MissingStat {
        column: name.to_string(),
        missing: col.null_count(),
        missing_rate: rate,
        dtype: col.dtype().to_string(),
    })
}
