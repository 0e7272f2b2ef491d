//! Pairwise correlation discovery between numeric columns.

use tracing::{debug, warn};

use crate::config::AnalysisConfig;
use crate::dataset::Dataset;
use crate::profiler::ColumnProfile;
use crate::types::CorrelationRecord;

/// Significance attached to correlations above the strong threshold.
const STRONG_SIGNIFICANCE: f64 = 0.95;
const BASE_SIGNIFICANCE: f64 = 0.75;

/// Pearson correlation of two series using the running-sums formula.
///
/// Only the first `min(x.len(), y.len())` points are used. Returns `0.0` for
/// fewer than two points or when either series is constant.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return 0.0;
    }

    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2, mut sum_y2) = (0.0, 0.0, 0.0, 0.0, 0.0);
    for (&a, &b) in x.iter().zip(y.iter()).take(n) {
        sum_x += a;
        sum_y += b;
        sum_xy += a * b;
        sum_x2 += a * a;
        sum_y2 += b * b;
    }

    let n = n as f64;
    let numerator = n * sum_xy - sum_x * sum_y;
    let denominator = ((n * sum_x2 - sum_x * sum_x) * (n * sum_y2 - sum_y * sum_y)).sqrt();

    // NaN covers a tiny negative variance left by rounding on constant series.
    if denominator == 0.0 || !denominator.is_finite() {
        return 0.0;
    }
    numerator / denominator
}

/// Find every pair of all-numeric columns whose absolute correlation exceeds
/// the configured threshold.
///
/// Pairs are visited as `(i, j)` with `i < j` in header order, and missing
/// cells count as `0`.
pub fn find_correlations(
    dataset: &Dataset,
    profiles: &[ColumnProfile],
    config: &AnalysisConfig,
) -> Vec<CorrelationRecord> {
    let mut numeric: Vec<&ColumnProfile> = profiles.iter().filter(|p| p.is_numeric()).collect();

    if numeric.len() > config.max_correlation_columns {
        warn!(
            "Correlation limited to the first {} of {} numeric columns",
            config.max_correlation_columns,
            numeric.len()
        );
        numeric.truncate(config.max_correlation_columns);
    }

    let series: Vec<Vec<f64>> = numeric
        .iter()
        .map(|p| dataset.zero_filled_column(p.index))
        .collect();

    let mut correlations = Vec::new();
    for i in 0..numeric.len() {
        for j in (i + 1)..numeric.len() {
            let strength = pearson(&series[i], &series[j]).abs().min(1.0);
            if strength > config.correlation_threshold {
                correlations.push(CorrelationRecord {
                    variables: [numeric[i].name.clone(), numeric[j].name.clone()],
                    strength,
                    significance: if strength > config.strong_correlation_threshold {
                        STRONG_SIGNIFICANCE
                    } else {
                        BASE_SIGNIFICANCE
                    },
                });
            }
        }
    }

    debug!(
        "Checked {} numeric columns, found {} correlations",
        numeric.len(),
        correlations.len()
    );
    correlations
}
