//! Shared numeric helpers: interpolated quantiles and rank correlation

/// Interpolated quantile of an ascending-sorted slice (linear interpolation
/// between the two nearest order statistics).
///
/// `q` is clamped to [0, 1]. Returns `None` for an empty slice.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let q = q.clamp(0.0, 1.0);
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let frac = pos - lo as f64;

    if lo + 1 < sorted.len() {
        Some(sorted[lo] + frac * (sorted[lo + 1] - sorted[lo]))
    } else {
        Some(sorted[lo])
    }
}

/// Average ranks (1-based) of a slice; tied values all receive the mean of
/// the ranks they span.
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        values[a]
            .partial_cmp(&values[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut ranks = vec![0.0; n];
    let mut i = 0;
    while i < n {
        // Find the extent of the tie group starting at sorted position i
        let mut j = i;
        while j < n && (values[order[j]] - values[order[i]]).abs() < 1e-12 {
            j += 1;
        }
        // Ranks i+1 ..= j averaged over the group
        let avg_rank = (i + 1 + j) as f64 / 2.0;
        for k in i..j {
            ranks[order[k]] = avg_rank;
        }
        i = j;
    }

    ranks
}

/// Pearson correlation using a single-pass Welford update for numerical
/// stability. Returns `None` for mismatched/empty input or zero variance.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len();
    if n == 0 || n != y.len() {
        return None;
    }

    let mut count = 0.0;
    let mut mean_x = 0.0;
    let mut mean_y = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    let mut cov_xy = 0.0;

    for (&xv, &yv) in x.iter().zip(y.iter()) {
        count += 1.0;
        let dx = xv - mean_x;
        let dy = yv - mean_y;
        mean_x += dx / count;
        mean_y += dy / count;
        var_x += dx * (xv - mean_x);
        var_y += dy * (yv - mean_y);
        cov_xy += dx * (yv - mean_y);
    }

    let std_x = (var_x / count).sqrt();
    let std_y = (var_y / count).sqrt();
    if std_x == 0.0 || std_y == 0.0 {
        return None;
    }

    Some(cov_xy / (count * std_x * std_y))
}

/// Spearman rank correlation: Pearson correlation of the average ranks.
pub fn spearman(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() < 2 || x.len() != y.len() {
        return None;
    }
    let rx = average_ranks(x);
    let ry = average_ranks(y);
    pearson(&rx, &ry)
}
