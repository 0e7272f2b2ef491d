//! Automated Insights Library
//!
//! Statistical profiling for tabular data built with Rust and Polars.
//!
//! # Overview
//!
//! Given a dataset already materialized as headers and rows of cells, the
//! library produces:
//!
//! - **Type Inference**: number, currency, date or text per column
//! - **Quality Scoring**: completeness, a 0-100 quality score and trend hints
//! - **Pattern Detection**: pairwise correlations and IQR outliers
//! - **Forecasting**: a naive three-step projection for numeric metrics
//! - **Insights and Recommendations**: ranked findings and prioritized actions
//! - **Chart Suggestions**: which charts fit the data and the points to plot
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use lex_insights::{DataAnalyzer, Dataset};
//! use polars::prelude::*;
//!
//! let df = CsvReadOptions::default()
//!     .with_has_header(true)
//!     .try_into_reader_with_file_path(Some("sales.csv".into()))?
//!     .finish()?;
//! let dataset = Dataset::from_dataframe(&df, "sales.csv", "csv")?;
//!
//! let analyzer = DataAnalyzer::default();
//! let analysis = analyzer.analyze(&dataset);
//! let insights = analyzer.generate_insights(&dataset, &analysis);
//! let recommendations = analyzer.generate_recommendations(&dataset, &analysis, &insights);
//!
//! println!("Quality: {}%", analysis.summary.data_quality);
//! for insight in &insights {
//!     println!("{}: {}", insight.title, insight.description);
//! }
//! ```
//!
//! # Configuration
//!
//! Use [`AnalysisConfig`] to change the thresholds:
//!
//! ```rust,ignore
//! use lex_insights::{AnalysisConfig, DataAnalyzer};
//!
//! let config = AnalysisConfig::builder()
//!     .correlation_threshold(0.5)       // Report |r| > 0.5 only
//!     .strong_correlation_threshold(0.8)
//!     .large_dataset_rows(10_000)
//!     .build()?;
//!
//! let analyzer = DataAnalyzer::new(config);
//! ```
//!
//! The analysis itself never fails. Errors ([`InsightsError`]) only come from
//! configuration validation, DataFrame conversion and report writing.

pub mod analyzer;
pub mod charts;
pub mod config;
pub mod dataset;
pub mod error;
pub mod forecast;
pub mod insights;
pub mod patterns;
pub mod profiler;
pub mod quality;
pub mod reporting;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use analyzer::DataAnalyzer;
pub use charts::{ChartKind, ChartPoint, ChartSuggester, ChartSuggestion};
pub use config::{AnalysisConfig, AnalysisConfigBuilder, ConfigValidationError};
pub use dataset::{Cell, Dataset};
pub use error::{InsightsError, Result as InsightsResult, ResultExt};
pub use forecast::Forecaster;
pub use insights::{InsightGenerator, RecommendationGenerator};
pub use patterns::{IqrBounds, PatternDetector};
pub use profiler::{ColumnProfile, DataProfiler, TypeInferencer};
pub use quality::QualityScorer;
pub use reporting::{AnalysisReport, ReportGenerator, SourceInfo};
pub use types::{
    AnalysisSummary, ColumnType, ColumnTypeMap, CorrelationRecord, DataAnalysis, ForecastRecord,
    Impact, Insight, InsightCategory, OutlierImpact, OutlierRecord, Patterns, Prediction,
    Priority, Recommendation, SeasonalPattern, Timeframe,
};

static_assertions::assert_impl_all!(Dataset: Send, Sync);
