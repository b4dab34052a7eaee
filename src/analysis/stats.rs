use std::f64::consts::PI;

use crate::charts::BoxSummary;

const WHISKER_REACH: f64 = 1.5;

/// Copies `values` into ascending order, dropping NaNs.
pub fn sorted(values: impl IntoIterator<Item = f64>) -> Vec<f64> {
    let mut values: Vec<f64> = values.into_iter().filter(|value| !value.is_nan()).collect();
    values.sort_by(f64::total_cmp);
    values
}

/// Quantile of ascending `sorted` data, interpolating linearly between the closest ranks.
pub fn percentile(sorted: &[f64], quantile: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }

    let position = quantile.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator).
pub fn standard_deviation(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }

    let mean = mean(values)?;
    let squares: f64 = values.iter().map(|value| (value - mean).powi(2)).sum();

    Some((squares / (values.len() - 1) as f64).sqrt())
}

/// Pearson correlation; `None` when either side has no variance or lengths differ.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }

    let x_mean = mean(xs)?;
    let y_mean = mean(ys)?;

    let (covariance, x_spread, y_spread) = xs.iter().zip(ys)
        .fold((0.0, 0.0, 0.0), |(covariance, x_spread, y_spread), (x, y)| {
            let dx = x - x_mean;
            let dy = y - y_mean;
            (covariance + dx * dy, x_spread + dx * dx, y_spread + dy * dy)
        });

    if x_spread == 0.0 || y_spread == 0.0 {
        return None;
    }

    Some((covariance / (x_spread.sqrt() * y_spread.sqrt())).clamp(-1.0, 1.0))
}

/// Pairwise Pearson matrix over equally long columns; undefined pairs are NaN.
pub fn correlation_matrix(columns: &[Vec<f64>]) -> Vec<Vec<f64>> {
    columns.iter().enumerate()
        .map(|(row, left)| {
            columns.iter().enumerate()
                .map(|(column, right)| match pearson(left, right) {
                    Some(_) if row == column => 1.0,
                    Some(coefficient) => coefficient,
                    None => f64::NAN
                })
                .collect()
        })
        .collect()
}

/// Gaussian kernel density estimate sampled at `grid_points` evenly spaced positions.
///
/// Bandwidth follows Scott's rule. The grid extends three bandwidths past the data,
/// but never below zero for non-negative data.
pub fn gaussian_kde(values: &[f64], grid_points: usize) -> Vec<(f64, f64)> {
    let (Some(low), Some(high)) = (values.iter().copied().reduce(f64::min), values.iter().copied().reduce(f64::max)) else {
        return Vec::new();
    };

    if grid_points < 2 {
        return Vec::new();
    }

    let bandwidth = standard_deviation(values)
        .map(|deviation| deviation * (values.len() as f64).powf(-0.2))
        .filter(|bandwidth| *bandwidth > 0.0)
        .unwrap_or(1.0);

    let start = if low >= 0.0 { (low - 3.0 * bandwidth).max(0.0) } else { low - 3.0 * bandwidth };
    let end = high + 3.0 * bandwidth;
    let step = (end - start) / (grid_points - 1) as f64;
    let normaliser = values.len() as f64 * bandwidth * (2.0 * PI).sqrt();

    (0..grid_points)
        .map(|index| {
            let position = start + step * index as f64;
            let density: f64 = values.iter()
                .map(|value| {
                    let distance = (position - value) / bandwidth;
                    (-0.5 * distance * distance).exp()
                })
                .sum();
            (position, density / normaliser)
        })
        .collect()
}

/// Box-plot statistics for ascending `sorted` data.
///
/// Whiskers reach the most extreme observations within 1.5 IQR of the box.
pub fn box_summary(label: &str, sorted: &[f64]) -> Option<BoxSummary> {
    let q1 = percentile(sorted, 0.25)?;
    let median = percentile(sorted, 0.5)?;
    let q3 = percentile(sorted, 0.75)?;
    let reach = WHISKER_REACH * (q3 - q1);

    let lower_whisker = sorted.iter().copied().find(|value| *value >= q1 - reach).unwrap_or(q1);
    let upper_whisker = sorted.iter().rev().copied().find(|value| *value <= q3 + reach).unwrap_or(q3);

    Some(BoxSummary {
        label: label.to_string(),
        lower_whisker,
        q1,
        median,
        q3,
        upper_whisker
    })
}
