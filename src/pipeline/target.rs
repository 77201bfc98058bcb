//! Target column validation and normalization
//!
//! A scorecard target is a strictly binary label: either already 0/1 (1 = bad
//! case) or the string pair "good"/"bad". Everything else is rejected up
//! front so the binning and evaluation steps can trust their inputs.

use polars::prelude::*;
use thiserror::Error;

/// Tolerance for floating point comparison when checking binary 0/1 values
const TOLERANCE: f64 = 1e-9;

/// Failures while validating or normalizing the target column
#[derive(Debug, Error)]
pub enum TargetError {
    /// The target column does not have exactly two distinct values.
    #[error("target column must contain exactly 2 distinct values, found {found}")]
    LabelCount { found: usize },

    /// The two values present are not a recognized binary encoding.
    #[error("target labels must be 0/1 or \"good\"/\"bad\", found {values:?}")]
    LabelValue { values: Vec<String> },

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

/// Normalize a binary target series to Int32 {0, 1} with 1 = bad.
///
/// Accepted encodings:
/// - numeric 0/1 (any numeric dtype, compared with a small float tolerance) -
///   returned as-is, cast to Int32
/// - the exact strings "good"/"bad" (case-sensitive) - mapped bad -> 1,
///   good -> 0
///
/// Always returns the normalized series; callers that want in-place
/// replacement use [`normalize_target_column`]. Nulls in the target are a
/// [`TargetError::LabelValue`] failure: a null label is neither good nor bad,
/// and silently dropping it would skew the bad/good totals downstream.
pub fn normalize_target(series: &Series) -> Result<Series, TargetError> {
    let non_null = series.drop_nulls();
    let unique = non_null.unique()?;

    if unique.len() != 2 {
        return Err(TargetError::LabelCount {
            found: unique.len(),
        });
    }

    if series.null_count() > 0 {
        let mut values = unique_values_as_strings(&unique)?;
        values.push("null".to_string());
        return Err(TargetError::LabelValue { values });
    }

    if series.dtype().is_primitive_numeric() {
        let float = series.cast(&DataType::Float64)?;
        let is_binary = float
            .f64()?
            .into_iter()
            .flatten()
            .all(|v| (v - 0.0).abs() < TOLERANCE || (v - 1.0).abs() < TOLERANCE);

        if is_binary {
            return Ok(series.cast(&DataType::Int32)?);
        }
        return Err(TargetError::LabelValue {
            values: unique_values_as_strings(&unique)?,
        });
    }

    if series.dtype() == &DataType::String {
        let mut values = unique_values_as_strings(&unique)?;
        values.sort();
        if values == ["bad", "good"] {
            let mapped: Vec<i32> = series
                .str()?
                .into_iter()
                .flatten()
                .map(|s| if s == "bad" { 1 } else { 0 })
                .collect();
            return Ok(Series::new(series.name().clone(), mapped));
        }
        return Err(TargetError::LabelValue { values });
    }

    Err(TargetError::LabelValue {
        values: unique_values_as_strings(&unique)?,
    })
}

/// Replace a DataFrame's target column with its normalized 0/1 form.
pub fn normalize_target_column(df: &mut DataFrame, target: &str) -> Result<(), TargetError> {
    let series = df.column(target)?.as_materialized_series().clone();
    let normalized = normalize_target(&series)?;
    df.with_column(normalized)?;
    Ok(())
}

/// Render the distinct values of a (small) series as sorted strings for
/// error messages.
fn unique_values_as_strings(unique: &Series) -> Result<Vec<String>, PolarsError> {
    let mut values: Vec<String> = match unique.dtype() {
        DataType::String => unique
            .str()?
            .into_iter()
            .flatten()
            .map(|s| s.to_string())
            .collect(),
        DataType::Float32 | DataType::Float64 => unique
            .cast(&DataType::Float64)?
            .f64()?
            .into_iter()
            .flatten()
            .map(|v| format!("{}", v))
            .collect(),
        _ => {
            let cast = unique.cast(&DataType::String)?;
            cast.str()?
                .into_iter()
                .flatten()
                .map(|s| s.to_string())
                .collect()
        }
    };
    values.sort();
    Ok(values)
}
