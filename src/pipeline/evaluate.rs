//! Rank-based model evaluation: KS, lift and ROC data
//!
//! Sorts observations worst-first by score, splits them into equal-population
//! tiles and computes cumulative good/bad distributions, bad rate, lift and
//! the Kolmogorov-Smirnov statistic per tile. Also derives ROC curve points
//! and trapezoidal AUC. Produces plot-ready tables; rendering is out of
//! scope.

use anyhow::Context;
use polars::prelude::*;
use serde::Serialize;
use thiserror::Error;

/// Failures of the rank evaluation operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("no observations to evaluate")]
    EmptyInput,

    #[error("scores and labels differ in length ({scores} vs {labels})")]
    LengthMismatch { scores: usize, labels: usize },

    #[error("tile count {tile_count} is invalid for {observations} observations")]
    InvalidTileCount {
        tile_count: usize,
        observations: usize,
    },

    /// All labels belong to one class; ROC/AUC is undefined.
    #[error("labels contain only one class")]
    NoClassVariation,
}

/// One equal-population tile of the score-sorted observations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileStat {
    /// Normalized tile position on a 0-1 axis
    pub tile: f64,
    pub good: u64,
    pub bad: u64,
    /// Tile goods as a fraction of all goods
    pub good_distri: f64,
    /// Tile bads as a fraction of all bads
    pub bad_distri: f64,
    /// Bads / (bads + goods) within the tile
    pub bad_rate: f64,
    /// Running bads over running total; NaN on the synthetic origin row
    pub cum_bad_rate: f64,
    /// Cumulative bad rate over the overall bad rate; NaN on the origin row
    pub lift: f64,
    pub cum_good: f64,
    pub cum_bad: f64,
    /// |cum_bad - cum_good|
    pub ks: f64,
}

/// Tile table produced by [`compute_ks_lift`]; row 0 is a synthetic
/// all-zero origin row so downstream curves start at (0, 0).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankEvalResult {
    pub tiles: Vec<TileStat>,
}

impl RankEvalResult {
    /// The tile with the largest KS value, ties broken by first occurrence.
    /// The synthetic origin row is never selected.
    pub fn max_ks_tile(&self) -> &TileStat {
        let mut best = &self.tiles[1];
        for tile in &self.tiles[1..] {
            if tile.ks > best.ks {
                best = tile;
            }
        }
        best
    }

    /// The maximal KS statistic of the score.
    pub fn max_ks(&self) -> f64 {
        self.max_ks_tile().ks
    }
}

/// Compute per-tile KS/lift statistics for a scored population.
///
/// `higher_is_worse = true` sorts descending (scores are probabilities of
/// the bad outcome); `false` sorts ascending (point scores where higher
/// means safer). Either way the worst observations come first. Ties keep
/// their input order (stable sort), so identical inputs always produce an
/// identical table.
///
/// Labels count as good only when 0 and bad only when 1; other values
/// contribute to no aggregate. A population with no goods or no bads
/// yields non-finite distribution fractions rather than an error.
pub fn compute_ks_lift(
    scores: &[f64],
    labels: &[i32],
    higher_is_worse: bool,
    tile_count: usize,
) -> Result<RankEvalResult, EvalError> {
    let n = scores.len();
    if n == 0 {
        return Err(EvalError::EmptyInput);
    }
    if labels.len() != n {
        return Err(EvalError::LengthMismatch {
            scores: n,
            labels: labels.len(),
        });
    }
    if tile_count == 0 || tile_count > n {
        return Err(EvalError::InvalidTileCount {
            tile_count,
            observations: n,
        });
    }

    // Stable sort keeps tied scores in input order
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        let cmp = scores[a]
            .partial_cmp(&scores[b])
            .unwrap_or(std::cmp::Ordering::Equal);
        if higher_is_worse {
            cmp.reverse()
        } else {
            cmp
        }
    });

    let total_good = labels.iter().filter(|&&l| l == 0).count() as u64;
    let total_bad = labels.iter().filter(|&&l| l == 1).count() as u64;
    let overall_bad_rate = total_bad as f64 / (total_bad + total_good) as f64;

    // Ceiling assignment of sorted ranks into near-equal tiles
    let step = n as f64 / tile_count as f64;
    let mut good_counts = vec![0u64; tile_count];
    let mut bad_counts = vec![0u64; tile_count];
    for (rank, &idx) in order.iter().enumerate() {
        let tile = (((rank + 1) as f64 / step).ceil() as usize).clamp(1, tile_count) - 1;
        match labels[idx] {
            0 => good_counts[tile] += 1,
            1 => bad_counts[tile] += 1,
            _ => {}
        }
    }

    let mut tiles = Vec::with_capacity(tile_count + 1);
    tiles.push(TileStat {
        tile: 0.0,
        good: 0,
        bad: 0,
        good_distri: 0.0,
        bad_distri: 0.0,
        bad_rate: 0.0,
        cum_bad_rate: f64::NAN,
        lift: f64::NAN,
        cum_good: 0.0,
        cum_bad: 0.0,
        ks: 0.0,
    });

    let mut running_good = 0u64;
    let mut running_bad = 0u64;
    for i in 0..tile_count {
        let good = good_counts[i];
        let bad = bad_counts[i];
        running_good += good;
        running_bad += bad;

        let cum_good = running_good as f64 / total_good as f64;
        let cum_bad = running_bad as f64 / total_bad as f64;
        let cum_bad_rate = running_bad as f64 / (running_bad + running_good) as f64;

        tiles.push(TileStat {
            tile: (i + 1) as f64 / tile_count as f64,
            good,
            bad,
            good_distri: good as f64 / total_good as f64,
            bad_distri: bad as f64 / total_bad as f64,
            bad_rate: bad as f64 / (bad + good) as f64,
            cum_bad_rate,
            lift: cum_bad_rate / overall_bad_rate,
            cum_good,
            cum_bad,
            ks: (cum_bad - cum_good).abs(),
        });
    }

    Ok(RankEvalResult { tiles })
}

/// Evaluate a score column of a DataFrame against a 0/1 target column.
/// Rows where either value is null are excluded.
pub fn evaluate_score_column(
    df: &DataFrame,
    score: &str,
    target: &str,
    higher_is_worse: bool,
    tile_count: usize,
) -> anyhow::Result<RankEvalResult> {
    let (scores, labels) = paired_score_labels(df, score, target)?;
    compute_ks_lift(&scores, &labels, higher_is_worse, tile_count)
        .with_context(|| format!("KS/lift evaluation of column '{}' failed", score))
}

/// One point of a ROC curve
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RocPoint {
    /// Score threshold producing this point (worst-first sweep)
    pub threshold: f64,
    pub fpr: f64,
    pub tpr: f64,
}

/// ROC curve points with trapezoidal AUC
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RocCurve {
    pub points: Vec<RocPoint>,
    pub auc: f64,
}

/// Compute ROC curve points and AUC for a scored population.
///
/// Sweeps the distinct scores worst-first, emitting one (FPR, TPR) point
/// per threshold, anchored at (0, 0). Requires both classes present.
pub fn roc_curve(
    scores: &[f64],
    labels: &[i32],
    higher_is_worse: bool,
) -> Result<RocCurve, EvalError> {
    let n = scores.len();
    if n == 0 {
        return Err(EvalError::EmptyInput);
    }
    if labels.len() != n {
        return Err(EvalError::LengthMismatch {
            scores: n,
            labels: labels.len(),
        });
    }

    let total_bad = labels.iter().filter(|&&l| l == 1).count() as f64;
    let total_good = labels.iter().filter(|&&l| l == 0).count() as f64;
    if total_bad == 0.0 || total_good == 0.0 {
        return Err(EvalError::NoClassVariation);
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        let cmp = scores[a]
            .partial_cmp(&scores[b])
            .unwrap_or(std::cmp::Ordering::Equal);
        if higher_is_worse {
            cmp.reverse()
        } else {
            cmp
        }
    });

    let mut points = vec![RocPoint {
        threshold: f64::INFINITY,
        fpr: 0.0,
        tpr: 0.0,
    }];

    let mut tp = 0.0;
    let mut fp = 0.0;
    let mut i = 0;
    while i < n {
        // Consume the whole tie group before emitting a point
        let threshold = scores[order[i]];
        while i < n && scores[order[i]] == threshold {
            match labels[order[i]] {
                1 => tp += 1.0,
                0 => fp += 1.0,
                _ => {}
            }
            i += 1;
        }
        points.push(RocPoint {
            threshold,
            fpr: fp / total_good,
            tpr: tp / total_bad,
        });
    }

    let auc = points
        .windows(2)
        .map(|w| (w[1].fpr - w[0].fpr) * (w[0].tpr + w[1].tpr) / 2.0)
        .sum();

    Ok(RocCurve { points, auc })
}

/// ROC for a DataFrame score column against a 0/1 target column.
pub fn roc_for_score_column(
    df: &DataFrame,
    score: &str,
    target: &str,
    higher_is_worse: bool,
) -> anyhow::Result<RocCurve> {
    let (scores, labels) = paired_score_labels(df, score, target)?;
    roc_curve(&scores, &labels, higher_is_worse)
        .with_context(|| format!("ROC computation for column '{}' failed", score))
}

fn paired_score_labels(
    df: &DataFrame,
    score: &str,
    target: &str,
) -> anyhow::Result<(Vec<f64>, Vec<i32>)> {
    let score_col = df
        .column(score)
        .with_context(|| format!("Score column '{}' not found", score))?
        .cast(&DataType::Float64)
        .with_context(|| format!("Score column '{}' must be numeric", score))?;
    let target_col = df
        .column(target)
        .with_context(|| format!("Target column '{}' not found", target))?
        .cast(&DataType::Int32)
        .with_context(|| format!("Target column '{}' must be numeric 0/1", target))?;

    let mut scores = Vec::with_capacity(df.height());
    let mut labels = Vec::with_capacity(df.height());
    for (s, l) in score_col.f64()?.iter().zip(target_col.i32()?.iter()) {
        if let (Some(s), Some(l)) = (s, l) {
            scores.push(s);
            labels.push(l);
        }
    }

    Ok((scores, labels))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_tile_example() {
        let scores = [0.1, 0.4, 0.35, 0.8];
        let labels = [0, 0, 1, 1];

        let result = compute_ks_lift(&scores, &labels, true, 2).unwrap();

        // Zero row plus exactly two tiles
        assert_eq!(result.tiles.len(), 3);
        let last = result.tiles.last().unwrap();
        assert!((last.cum_good - 1.0).abs() < 1e-12);
        assert!((last.cum_bad - 1.0).abs() < 1e-12);
        for tile in &result.tiles {
            assert!(tile.ks <= 1.0);
        }
    }

    #[test]
    fn test_origin_row_shape() {
        let result = compute_ks_lift(&[0.2, 0.9], &[0, 1], true, 2).unwrap();
        let origin = &result.tiles[0];

        assert_eq!(origin.tile, 0.0);
        assert_eq!(origin.good, 0);
        assert_eq!(origin.bad, 0);
        assert_eq!(origin.cum_good, 0.0);
        assert_eq!(origin.cum_bad, 0.0);
        assert_eq!(origin.ks, 0.0);
        assert!(origin.cum_bad_rate.is_nan());
        assert!(origin.lift.is_nan());
    }

    #[test]
    fn test_perfect_separation_ks_is_one() {
        // All bads score above all goods
        let scores = [0.9, 0.8, 0.2, 0.1];
        let labels = [1, 1, 0, 0];

        let result = compute_ks_lift(&scores, &labels, true, 2).unwrap();
        assert!((result.max_ks() - 1.0).abs() < 1e-12);

        // First tile holds both bads: lift = 1.0 / 0.5
        assert!((result.tiles[1].lift - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_cumulatives_non_decreasing() {
        let scores = [0.1, 0.7, 0.3, 0.9, 0.5, 0.2, 0.8, 0.4];
        let labels = [0, 1, 0, 1, 1, 0, 0, 1];

        let result = compute_ks_lift(&scores, &labels, true, 4).unwrap();
        for w in result.tiles.windows(2) {
            assert!(w[1].cum_good >= w[0].cum_good);
            assert!(w[1].cum_bad >= w[0].cum_bad);
        }
    }

    #[test]
    fn test_ascending_sort_for_point_scores() {
        // Higher score = safer: the worst observation (score 100) has label 1
        // and must land in the first tile under ascending order
        let scores = [100.0, 300.0, 200.0, 400.0];
        let labels = [1, 0, 1, 0];

        let result = compute_ks_lift(&scores, &labels, false, 2).unwrap();
        assert_eq!(result.tiles[1].bad, 2);
        assert_eq!(result.tiles[1].good, 0);
    }

    #[test]
    fn test_max_ks_tile_first_occurrence() {
        let scores = [0.9, 0.8, 0.7, 0.6];
        let labels = [1, 0, 1, 0];

        let result = compute_ks_lift(&scores, &labels, true, 4).unwrap();
        let max_tile = result.max_ks_tile();

        let expected = result.tiles[1..]
            .iter()
            .map(|t| t.ks)
            .fold(f64::MIN, f64::max);
        assert_eq!(max_tile.ks, expected);
        // Ties resolve to the earliest tile
        let first_at_max = result.tiles[1..]
            .iter()
            .find(|t| t.ks == expected)
            .unwrap();
        assert_eq!(max_tile.tile, first_at_max.tile);
    }

    #[test]
    fn test_deterministic_with_ties() {
        let scores = [0.5, 0.5, 0.5, 0.5, 0.2, 0.2];
        let labels = [1, 0, 1, 0, 1, 0];

        let a = compute_ks_lift(&scores, &labels, true, 3).unwrap();
        let b = compute_ks_lift(&scores, &labels, true, 3).unwrap();
        // The origin row carries NaN fields, so compare the real tiles
        assert_eq!(a.tiles[1..], b.tiles[1..]);
    }

    #[test]
    fn test_empty_input_rejected() {
        assert_eq!(compute_ks_lift(&[], &[], true, 1), Err(EvalError::EmptyInput));
    }

    #[test]
    fn test_invalid_tile_counts_rejected() {
        let scores = [0.1, 0.2];
        let labels = [0, 1];

        assert_eq!(
            compute_ks_lift(&scores, &labels, true, 0),
            Err(EvalError::InvalidTileCount {
                tile_count: 0,
                observations: 2
            })
        );
        assert_eq!(
            compute_ks_lift(&scores, &labels, true, 3),
            Err(EvalError::InvalidTileCount {
                tile_count: 3,
                observations: 2
            })
        );
    }

    #[test]
    fn test_length_mismatch_rejected() {
        assert_eq!(
            compute_ks_lift(&[0.1, 0.2], &[0], true, 1),
            Err(EvalError::LengthMismatch {
                scores: 2,
                labels: 1
            })
        );
    }

    #[test]
    fn test_tile_counts_partition_population() {
        let scores: Vec<f64> = (0..10).map(|i| i as f64 / 10.0).collect();
        let labels = [0, 1, 0, 1, 0, 1, 0, 1, 0, 1];

        let result = compute_ks_lift(&scores, &labels, true, 3).unwrap();
        let total: u64 = result.tiles.iter().map(|t| t.good + t.bad).sum();
        assert_eq!(total, 10);
        assert_eq!(result.tiles.len(), 4);
    }

    #[test]
    fn test_roc_perfect_separation() {
        let scores = [0.9, 0.8, 0.2, 0.1];
        let labels = [1, 1, 0, 0];

        let roc = roc_curve(&scores, &labels, true).unwrap();
        assert!((roc.auc - 1.0).abs() < 1e-12);
        assert_eq!(roc.points.first().unwrap().fpr, 0.0);
        assert_eq!(roc.points.last().unwrap().tpr, 1.0);
        assert_eq!(roc.points.last().unwrap().fpr, 1.0);
    }

    #[test]
    fn test_roc_interleaved_labels() {
        let scores = [0.8, 0.7, 0.6, 0.5];
        let labels = [1, 0, 1, 0];

        let roc = roc_curve(&scores, &labels, true).unwrap();
        assert!((roc.auc - 0.75).abs() < 1e-12, "auc was {}", roc.auc);
    }

    #[test]
    fn test_roc_single_class_rejected() {
        assert_eq!(
            roc_curve(&[0.1, 0.2], &[1, 1], true),
            Err(EvalError::NoClassVariation)
        );
    }

    #[test]
    fn test_evaluate_score_column_skips_nulls() {
        let df = df! {
            "score" => [Some(0.9f64), Some(0.8), None, Some(0.1)],
            "target" => [1i32, 1, 0, 0],
        }
        .unwrap();

        let result = evaluate_score_column(&df, "score", "target", true, 3).unwrap();
        let total: u64 = result.tiles.iter().map(|t| t.good + t.bad).sum();
        assert_eq!(total, 3);
    }
}
