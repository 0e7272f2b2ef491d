//! Pattern detection module.
//!
//! Finds relationships and anomalies in numeric data:
//! - Pairwise Pearson correlations between all-numeric columns
//! - Per-column IQR outliers
//! - Seasonality (reserved, currently always empty)

mod correlation;
mod outliers;
mod seasonality;

use tracing::debug;

use crate::config::AnalysisConfig;
use crate::dataset::Dataset;
use crate::profiler::ColumnProfile;
use crate::types::Patterns;

pub use correlation::{find_correlations, pearson};
pub use outliers::{IqrBounds, detect_outliers};
pub use seasonality::detect_seasonality;

/// Runs every pattern detector over a dataset.
pub struct PatternDetector;

impl PatternDetector {
    pub fn detect(
        dataset: &Dataset,
        profiles: &[ColumnProfile],
        config: &AnalysisConfig,
    ) -> Patterns {
        let correlations = find_correlations(dataset, profiles, config);
        let outliers = detect_outliers(dataset, config);
        let seasonality = detect_seasonality(dataset);

        debug!(
            "Patterns: {} correlations, {} outlier columns",
            correlations.len(),
            outliers.len()
        );

        Patterns {
            correlations,
            outliers,
            seasonality,
        }
    }
}
