//! IQR-based outlier detection.
//!
//! Quartiles are read directly from the sorted values at indices
//! `floor(n * 0.25)` and `floor(n * 0.75)`, without interpolation.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::dataset::Dataset;
use crate::types::{OutlierImpact, OutlierRecord};

/// Share of a column's values above which its outliers are high impact.
const HIGH_IMPACT_SHARE: f64 = 0.1;
const IQR_MULTIPLIER: f64 = 1.5;

/// Quartiles and Tukey fences of a numeric sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IqrBounds {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower: f64,
    pub upper: f64,
}

impl IqrBounds {
    /// Compute bounds from values sorted in ascending order.
    ///
    /// Returns `None` for an empty slice.
    pub fn from_sorted(sorted: &[f64]) -> Option<Self> {
        if sorted.is_empty() {
            return None;
        }
        let n = sorted.len();
        // floor(n * 0.25) and floor(n * 0.75), exact in integer arithmetic
        let q1 = sorted[n / 4];
        let q3 = sorted[n * 3 / 4];
        let iqr = q3 - q1;

        Some(Self {
            q1,
            q3,
            iqr,
            lower: q1 - IQR_MULTIPLIER * iqr,
            upper: q3 + IQR_MULTIPLIER * iqr,
        })
    }

    /// Whether a value lies strictly outside the fences.
    #[inline]
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower || value > self.upper
    }
}

/// Detect outliers in every column with enough numeric values.
///
/// Non-missing cells are coerced to numbers and non-numeric ones are dropped
/// (not zero-filled). Only columns with at least one outlier are reported.
pub fn detect_outliers(dataset: &Dataset, config: &AnalysisConfig) -> Vec<OutlierRecord> {
    let mut records = Vec::new();

    for (index, header) in dataset.headers().iter().enumerate() {
        let values: Vec<f64> = dataset
            .valid_cells(index)
            .filter_map(|cell| cell.as_number())
            .collect();

        if values.len() < config.min_outlier_values {
            continue;
        }

        let mut sorted = values.clone();
        sorted.sort_by(f64::total_cmp);
        let Some(bounds) = IqrBounds::from_sorted(&sorted) else {
            continue;
        };

        let outliers: Vec<f64> = values
            .iter()
            .copied()
            .filter(|&v| bounds.is_outlier(v))
            .collect();

        if outliers.is_empty() {
            continue;
        }

        let impact = if outliers.len() as f64 > values.len() as f64 * HIGH_IMPACT_SHARE {
            OutlierImpact::High
        } else {
            OutlierImpact::Moderate
        };

        debug!(
            "Column '{}': {} outliers outside [{:.2}, {:.2}] ({})",
            header,
            outliers.len(),
            bounds.lower,
            bounds.upper,
            impact.as_str()
        );

        records.push(OutlierRecord {
            field: header.clone(),
            values: outliers,
            impact,
            lower_bound: bounds.lower,
            upper_bound: bounds.upper,
        });
    }

    records
}
