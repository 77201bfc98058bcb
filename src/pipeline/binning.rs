//! Monotonic WOE/IV binning
//!
//! Partitions a continuous predictor into quantile buckets, coarsening the
//! partition one bucket at a time until the per-bucket bad-rate trend is
//! perfectly rank-correlated with the bucket order (|Spearman rho| == 1),
//! then reports Weight-of-Evidence and Information Value per bucket.

use anyhow::Context;
use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;

use super::stats::{quantile_sorted, spearman};
use super::target::{normalize_target, TargetError};
use crate::utils::progress::feature_bar;

/// The coarsening search never goes below this bucket count; a single
/// bucket is trivially monotonic but carries no information.
pub const MIN_BUCKETS: usize = 2;

/// |rho| == 1 is tested in floating point against this tolerance.
const RHO_TOLERANCE: f64 = 1e-9;

/// Policy for duplicate quantile edges (heavily tied predictors)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum DuplicateEdges {
    /// Fail when two quantile edges coincide
    #[default]
    Raise,
    /// Deduplicate coinciding edges, reducing the effective bucket count
    Drop,
}

impl std::fmt::Display for DuplicateEdges {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DuplicateEdges::Raise => write!(f, "raise"),
            DuplicateEdges::Drop => write!(f, "drop"),
        }
    }
}

impl std::str::FromStr for DuplicateEdges {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "raise" => Ok(DuplicateEdges::Raise),
            "drop" => Ok(DuplicateEdges::Drop),
            _ => Err(format!(
                "Unknown duplicate-edge policy: '{}'. Use 'raise' or 'drop'.",
                s
            )),
        }
    }
}

/// Tunables for the monotonic binning search
#[derive(Debug, Clone, Copy)]
pub struct BinningOptions {
    /// Starting quantile target for the coarsening search
    pub initial_bins: usize,
    /// Decimal places for the exported cut points
    pub precision: u32,
    /// How to handle coinciding quantile edges
    pub duplicate_edges: DuplicateEdges,
}

impl Default for BinningOptions {
    fn default() -> Self {
        Self {
            initial_bins: 20,
            precision: 3,
            duplicate_edges: DuplicateEdges::Raise,
        }
    }
}

/// One bucket of the final monotonic partition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketStat {
    /// Smallest predictor value observed in the bucket
    pub min: f64,
    /// Largest predictor value observed in the bucket
    pub max: f64,
    pub bad_count: u64,
    pub good_count: u64,
    pub total: u64,
    /// Bucket bads as a fraction of all bads
    pub bad_rate: f64,
    /// Bucket goods as a fraction of all goods
    pub good_rate: f64,
    /// ln(bad_rate / good_rate); non-finite when either rate is zero
    pub woe: f64,
    /// (bad_rate - good_rate) * woe
    pub iv: f64,
}

/// Result of a monotonic binning run
#[derive(Debug, Clone, Serialize)]
pub struct BinningResult {
    pub buckets: Vec<BucketStat>,
    /// Sum of per-bucket IV contributions (non-finite values propagate)
    pub iv_sum: f64,
    /// Strictly increasing boundaries bracketed by -inf/+inf;
    /// length = bucket count + 1
    pub cut_points: Vec<f64>,
}

/// Failures of the monotonic binning operation
#[derive(Debug, Error)]
pub enum BinningError {
    #[error(transparent)]
    Target(#[from] TargetError),

    #[error("predictor column must be numeric, got {dtype}")]
    NonNumericPredictor { dtype: String },

    #[error("labels and predictor differ in length ({labels} vs {predictor})")]
    LengthMismatch { labels: usize, predictor: usize },

    #[error("too few observations to bin ({0})")]
    InsufficientData(usize),

    /// Quantile edges coincided under the `raise` policy.
    #[error(
        "duplicate quantile edges at {buckets} buckets; use the 'drop' policy for tied predictors"
    )]
    DuplicateEdges { buckets: usize },

    /// The coarsening search reached the bucket floor without monotonicity.
    #[error("no monotonic binning found above the {floor}-bucket floor")]
    NoMonotonicFit { floor: usize },

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

/// Bin a continuous predictor against a binary target with a monotonic
/// bad-rate constraint.
///
/// The labels are normalized first (see [`normalize_target`]); rows with a
/// null predictor are excluded from the buckets while the bad/good totals
/// cover every labeled row. Starting from `initial_bins` quantile targets,
/// the bucket count is decremented until the Spearman rank correlation
/// between per-bucket mean predictor and per-bucket mean label is exactly
/// +/-1, or until the [`MIN_BUCKETS`] floor fails the search.
///
/// WOE is ln(bad_rate/good_rate) with no smoothing: a bucket with zero bads
/// or zero goods yields a non-finite WOE/IV, which propagates into the
/// output rather than failing the call.
pub fn mono_bin(
    labels: &Series,
    predictor: &Series,
    options: &BinningOptions,
) -> Result<BinningResult, BinningError> {
    if !predictor.dtype().is_primitive_numeric() {
        return Err(BinningError::NonNumericPredictor {
            dtype: predictor.dtype().to_string(),
        });
    }

    let normalized = normalize_target(labels)?;
    if normalized.len() != predictor.len() {
        return Err(BinningError::LengthMismatch {
            labels: normalized.len(),
            predictor: predictor.len(),
        });
    }

    let ys = normalized.i32()?;
    let float_predictor = predictor.cast(&DataType::Float64)?;
    let xs = float_predictor.f64()?;

    // Totals cover every labeled row; null predictors only fall out of the
    // bucket assignment below.
    let mut total_bad = 0u64;
    let mut total_good = 0u64;
    let mut pairs: Vec<(f64, i32)> = Vec::with_capacity(xs.len());

    for (x, y) in xs.iter().zip(ys.iter()) {
        let Some(y) = y else { continue };
        if y == 1 {
            total_bad += 1;
        } else {
            total_good += 1;
        }
        if let Some(x) = x {
            pairs.push((x, y));
        }
    }

    if pairs.len() < MIN_BUCKETS {
        return Err(BinningError::InsufficientData(pairs.len()));
    }

    pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
    let sorted_x: Vec<f64> = pairs.iter().map(|(x, _)| *x).collect();

    let mut n = options.initial_bins.max(MIN_BUCKETS);
    loop {
        let ranges = quantile_partition(&sorted_x, n, options.duplicate_edges)?;

        if is_monotonic(&pairs, &ranges) {
            return Ok(build_result(
                &pairs,
                &ranges,
                total_bad,
                total_good,
                options.precision,
            ));
        }

        if n == MIN_BUCKETS {
            return Err(BinningError::NoMonotonicFit { floor: MIN_BUCKETS });
        }
        n -= 1;
    }
}

/// Partition sorted values into `n` quantile buckets, returning the
/// non-empty index ranges. Buckets are half-open intervals (lower, upper]
/// over interpolated quantile edges.
fn quantile_partition(
    sorted_x: &[f64],
    n: usize,
    policy: DuplicateEdges,
) -> Result<Vec<(usize, usize)>, BinningError> {
    // Interior edges at i/n for i in 1..n
    let mut edges: Vec<f64> = (1..n)
        .filter_map(|i| quantile_sorted(sorted_x, i as f64 / n as f64))
        .collect();

    let has_duplicates = edges.windows(2).any(|w| w[0] >= w[1]);
    if has_duplicates {
        match policy {
            DuplicateEdges::Raise => return Err(BinningError::DuplicateEdges { buckets: n }),
            DuplicateEdges::Drop => edges.dedup_by(|a, b| *a <= *b),
        }
    }

    // Sorted input, so a single forward walk assigns every value
    let mut ranges = Vec::with_capacity(edges.len() + 1);
    let mut start = 0usize;
    for &edge in &edges {
        let end = start + sorted_x[start..].partition_point(|&v| v <= edge);
        if end > start {
            ranges.push((start, end));
        }
        start = end;
    }
    if start < sorted_x.len() {
        ranges.push((start, sorted_x.len()));
    }

    Ok(ranges)
}

/// Perfect rank correlation between per-bucket mean predictor and mean label.
/// An undefined rho (constant means, fewer than two buckets) counts as
/// non-monotonic.
fn is_monotonic(pairs: &[(f64, i32)], ranges: &[(usize, usize)]) -> bool {
    let mut mean_x = Vec::with_capacity(ranges.len());
    let mut mean_y = Vec::with_capacity(ranges.len());

    for &(start, end) in ranges {
        let len = (end - start) as f64;
        let bucket = &pairs[start..end];
        mean_x.push(bucket.iter().map(|(x, _)| x).sum::<f64>() / len);
        mean_y.push(bucket.iter().map(|(_, y)| *y as f64).sum::<f64>() / len);
    }

    match spearman(&mean_x, &mean_y) {
        Some(rho) => 1.0 - rho.abs() < RHO_TOLERANCE,
        None => false,
    }
}

fn build_result(
    pairs: &[(f64, i32)],
    ranges: &[(usize, usize)],
    total_bad: u64,
    total_good: u64,
    precision: u32,
) -> BinningResult {
    let mut buckets = Vec::with_capacity(ranges.len());

    for &(start, end) in ranges {
        let bucket = &pairs[start..end];
        let bad_count = bucket.iter().filter(|(_, y)| *y == 1).count() as u64;
        let total = bucket.len() as u64;
        let good_count = total - bad_count;

        let bad_rate = bad_count as f64 / total_bad as f64;
        let good_rate = good_count as f64 / total_good as f64;
        let woe = (bad_rate / good_rate).ln();
        let iv = (bad_rate - good_rate) * woe;

        buckets.push(BucketStat {
            min: bucket[0].0,
            max: bucket[bucket.len() - 1].0,
            bad_count,
            good_count,
            total,
            bad_rate,
            good_rate,
            woe,
            iv,
        });
    }

    let iv_sum: f64 = buckets.iter().map(|b| b.iv).sum();

    // Interior boundaries are the rounded upper bounds of all buckets but
    // the last; length = bucket count + 1. Bucket maxima are strictly
    // increasing, but rounding can collapse boundaries closer than the
    // rounding step; the list then keeps the full-precision maxima so the
    // strict ordering holds.
    let interior = &buckets[..buckets.len() - 1];
    let mut rounded: Vec<f64> = interior
        .iter()
        .map(|b| round_to(b.max, precision))
        .collect();
    if rounded.windows(2).any(|w| w[0] >= w[1]) {
        rounded = interior.iter().map(|b| b.max).collect();
    }

    let mut cut_points = Vec::with_capacity(buckets.len() + 1);
    cut_points.push(f64::NEG_INFINITY);
    cut_points.extend(rounded);
    cut_points.push(f64::INFINITY);

    BinningResult {
        buckets,
        iv_sum,
        cut_points,
    }
}

fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}

/// Binning result for a named feature
#[derive(Debug, Clone, Serialize)]
pub struct FeatureBinning {
    pub feature: String,
    pub binning: BinningResult,
}

/// Run the monotonic binner over every numeric column except the target,
/// in parallel, skipping features for which no monotonic fit exists.
/// Results are sorted by total IV descending.
pub fn bin_features(
    df: &DataFrame,
    target: &str,
    options: &BinningOptions,
) -> anyhow::Result<Vec<FeatureBinning>> {
    let labels = df
        .column(target)
        .with_context(|| format!("Target column '{}' not found", target))?
        .as_materialized_series()
        .clone();
    let normalized =
        normalize_target(&labels).with_context(|| format!("Invalid target column '{}'", target))?;

    let numeric_cols: Vec<String> = df
        .get_columns()
        .iter()
        .filter(|col| col.dtype().is_primitive_numeric() && col.name() != target)
        .map(|col| col.name().to_string())
        .collect();

    if numeric_cols.is_empty() {
        return Ok(Vec::new());
    }

    let pb = feature_bar(numeric_cols.len() as u64, "Binning features");

    let mut analyses: Vec<FeatureBinning> = numeric_cols
        .par_iter()
        .filter_map(|col_name| {
            let result = df
                .column(col_name)
                .ok()
                .and_then(|col| mono_bin(&normalized, col.as_materialized_series(), options).ok())
                .map(|binning| FeatureBinning {
                    feature: col_name.clone(),
                    binning,
                });
            pb.inc(1);
            result
        })
        .collect();

    pb.finish_with_message(format!(
        "   [OK] Binned {} of {} numeric features",
        analyses.len(),
        numeric_cols.len()
    ));

    analyses.sort_by(|a, b| {
        b.binning
            .iv_sum
            .partial_cmp(&a.binning.iv_sum)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Ok(analyses)
}
