use std::collections::HashSet;

use tracing::debug;

use crate::dataset::{Cell, Dataset};
use crate::profiler::ColumnProfile;
use crate::types::AnalysisSummary;
use crate::utils::round_half_up;

/// Emitted when a date-like value appears near the top of some column.
pub const TEMPORAL_TREND: &str = "Temporal data detected - trend analysis possible";
/// Emitted when at least two columns are entirely numeric.
pub const MULTI_NUMERIC_TREND: &str = "Multiple numeric metrics - correlations possible";
/// Emitted when some column has a small set of repeated values.
pub const CATEGORICAL_TREND: &str = "Categorical data identified - segmentation available";

/// Rows scanned per column when looking for dates.
const TEMPORAL_SCAN_ROWS: usize = 5;
/// Maximum score deducted when every row is a duplicate.
const DUPLICATE_PENALTY_WEIGHT: f64 = 20.0;
/// Maximum score deducted per mostly-numeric column that is entirely non-numeric.
const TYPE_PENALTY_WEIGHT: f64 = 10.0;

/// Scores completeness and quality, and derives trend hints.
pub struct QualityScorer;

impl QualityScorer {
    /// Build the dataset summary from precomputed column profiles.
    pub fn summarize(dataset: &Dataset, profiles: &[ColumnProfile]) -> AnalysisSummary {
        let completeness = Self::calculate_completeness(dataset);
        let data_quality = Self::calculate_data_quality(dataset, profiles);
        let trends = Self::identify_trends(dataset, profiles);

        debug!(
            "Quality summary: quality={}, completeness={}, trends={}",
            data_quality,
            completeness,
            trends.len()
        );

        AnalysisSummary {
            total_records: dataset.row_count(),
            data_quality,
            completeness,
            trends,
        }
    }

    /// Percentage of non-missing cells over `rows x headers`, rounded.
    pub fn calculate_completeness(dataset: &Dataset) -> u8 {
        let total_cells = dataset.row_count() * dataset.column_count();
        if total_cells == 0 {
            return 0;
        }

        let filled_cells: usize = (0..dataset.column_count())
            .map(|index| dataset.valid_cells(index).count())
            .sum();

        round_half_up(filled_cells as f64 / total_cells as f64 * 100.0).clamp(0.0, 100.0) as u8
    }

    /// Quality score out of 100.
    ///
    /// Starts at 100, loses up to 20 points for the share of duplicate rows and
    /// up to 10 points for every mostly-numeric column in proportion to its
    /// non-numeric values. Never negative.
    pub fn calculate_data_quality(dataset: &Dataset, profiles: &[ColumnProfile]) -> u8 {
        let mut score = 100.0;

        let total_rows = dataset.row_count();
        if total_rows > 0 {
            let duplicates = Self::count_duplicate_rows(dataset);
            score -= duplicates as f64 / total_rows as f64 * DUPLICATE_PENALTY_WEIGHT;
        }

        for profile in profiles.iter().filter(|p| p.is_mostly_numeric()) {
            score -= profile.non_numeric_fraction() * TYPE_PENALTY_WEIGHT;
        }

        round_half_up(score).clamp(0.0, 100.0) as u8
    }

    /// Rows whose full content repeats an earlier row. Comparison is
    /// order-sensitive and distinguishes numbers from numeric text.
    pub fn count_duplicate_rows(dataset: &Dataset) -> usize {
        let mut seen = HashSet::with_capacity(dataset.row_count());
        dataset
            .rows()
            .iter()
            .filter(|row| !seen.insert(row_key(row)))
            .count()
    }

    /// Fixed trend hints, in order: temporal, multi-numeric, categorical.
    pub fn identify_trends(dataset: &Dataset, profiles: &[ColumnProfile]) -> Vec<String> {
        let mut trends = Vec::new();

        let has_temporal = (0..dataset.column_count()).any(|index| {
            dataset
                .column_cells(index)
                .take(TEMPORAL_SCAN_ROWS)
                .any(Cell::is_date)
        });
        if has_temporal {
            trends.push(TEMPORAL_TREND.to_string());
        }

        if profiles.iter().filter(|p| p.is_numeric()).count() >= 2 {
            trends.push(MULTI_NUMERIC_TREND.to_string());
        }

        if profiles.iter().any(ColumnProfile::is_categorical) {
            trends.push(CATEGORICAL_TREND.to_string());
        }

        trends
    }
}

fn row_key(row: &[Cell]) -> Vec<String> {
    row.iter().map(Cell::distinct_key).collect()
}
