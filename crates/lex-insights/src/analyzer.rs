//! The analysis entry point.
//!
//! [`DataAnalyzer`] runs the stages in order: type inference, column
//! profiling, quality scoring, pattern detection and forecasting. Insights and
//! recommendations are derived from the finished [`DataAnalysis`].

use std::time::Instant;

use tracing::{debug, info};

use crate::config::AnalysisConfig;
use crate::dataset::Dataset;
use crate::forecast::Forecaster;
use crate::insights::{InsightGenerator, RecommendationGenerator};
use crate::patterns::PatternDetector;
use crate::profiler::{DataProfiler, TypeInferencer};
use crate::quality::QualityScorer;
use crate::types::{DataAnalysis, Insight, Recommendation};

/// Stateless analysis engine. Holds only its configuration, so one instance
/// can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct DataAnalyzer {
    config: AnalysisConfig,
}

impl DataAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Profile a dataset.
    ///
    /// Never fails: unparseable cells lower the quality score or are skipped,
    /// and empty datasets produce zeroed summaries with no patterns.
    pub fn analyze(&self, dataset: &Dataset) -> DataAnalysis {
        let start = Instant::now();
        info!(
            "Analyzing {} rows x {} columns",
            dataset.row_count(),
            dataset.column_count()
        );

        let column_types = TypeInferencer::detect_data_types(dataset, self.config.type_sample_size);
        let profiles = DataProfiler::profile_columns(dataset);
        debug!("Profiled {} columns", profiles.len());

        let summary = QualityScorer::summarize(dataset, &profiles);
        let patterns = PatternDetector::detect(dataset, &profiles, &self.config);
        let forecasts = Forecaster::forecast(dataset, &profiles, &self.config);

        info!(
            "Analysis complete in {:?}: quality {}%, completeness {}%, {} correlations, {} outlier columns",
            start.elapsed(),
            summary.data_quality,
            summary.completeness,
            patterns.correlations.len(),
            patterns.outliers.len()
        );

        DataAnalysis {
            column_types,
            summary,
            patterns,
            forecasts,
        }
    }

    pub fn generate_insights(&self, dataset: &Dataset, analysis: &DataAnalysis) -> Vec<Insight> {
        InsightGenerator::new(self.config.clone()).generate(dataset, analysis)
    }

    pub fn generate_recommendations(
        &self,
        dataset: &Dataset,
        analysis: &DataAnalysis,
        insights: &[Insight],
    ) -> Vec<Recommendation> {
        RecommendationGenerator::new(self.config.clone()).generate(dataset, analysis, insights)
    }
}

static_assertions::assert_impl_all!(DataAnalyzer: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Cell;
    use crate::types::ColumnType;

    #[test]
    fn test_analyze_empty_dataset() {
        let analysis = DataAnalyzer::default().analyze(&Dataset::default());

        assert_eq!(analysis.summary.total_records, 0);
        assert_eq!(analysis.summary.completeness, 0);
        assert_eq!(analysis.summary.data_quality, 100);
        assert!(analysis.summary.trends.is_empty());
        assert!(analysis.patterns.correlations.is_empty());
        assert!(analysis.patterns.outliers.is_empty());
        assert!(analysis.forecasts.is_empty());
        assert!(analysis.column_types.is_empty());
    }

    #[test]
    fn test_analyze_headers_without_rows() {
        let dataset = Dataset::new(vec!["a".to_string(), "b".to_string()], Vec::new());
        let analysis = DataAnalyzer::default().analyze(&dataset);

        assert_eq!(analysis.summary.completeness, 0);
        assert_eq!(analysis.column_types.get("a"), Some(ColumnType::Text));
        assert!(analysis.forecasts.is_empty());
    }

    #[test]
    fn test_custom_config_is_used() {
        let config = AnalysisConfig::builder().forecast_columns(1).build().unwrap();
        let dataset = Dataset::new(
            vec!["a".to_string(), "b".to_string()],
            vec![
                vec![Cell::from(1.0), Cell::from(2.0)],
                vec![Cell::from(2.0), Cell::from(3.0)],
            ],
        );

        let analysis = DataAnalyzer::new(config).analyze(&dataset);

        assert_eq!(analysis.forecasts.len(), 1);
        assert_eq!(analysis.forecasts[0].metric, "a");
    }
}
