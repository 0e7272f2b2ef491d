//! Configuration for the analysis engine.
//!
//! Every threshold used by the analysis stages lives here.
//! `AnalysisConfig::default()` is what most callers want.

use serde::{Deserialize, Serialize};

/// Tunable thresholds for a single analysis run.
///
/// Use [`AnalysisConfig::builder()`] to override individual values.
///
/// # Example
///
/// ```rust,ignore
/// use lex_insights::config::AnalysisConfig;
///
/// let config = AnalysisConfig::builder()
///     .correlation_threshold(0.5)
///     .large_dataset_rows(10_000)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of leading non-missing values sampled for type inference.
    /// Default: 10
    pub type_sample_size: usize,

    /// Minimum absolute Pearson coefficient for a correlation to be reported.
    /// Default: 0.3
    pub correlation_threshold: f64,

    /// Absolute coefficient above which a correlation counts as strong
    /// (higher significance bucket, insight and recommendation).
    /// Default: 0.7
    pub strong_correlation_threshold: f64,

    /// Maximum number of numeric columns paired during correlation discovery.
    /// Columns past this cap are skipped with a warning.
    /// Default: 200
    pub max_correlation_columns: usize,

    /// Minimum count of numeric values a column needs for outlier detection.
    /// Default: 5
    pub min_outlier_values: usize,

    /// Number of numeric columns that receive a forecast.
    /// Default: 2
    pub forecast_columns: usize,

    /// Quality score below which the dataset is flagged for cleaning.
    /// Default: 80
    pub quality_alert_threshold: u8,

    /// Row count above which the dataset is considered large.
    /// Default: 5000
    pub large_dataset_rows: usize,

    /// Row count above which automated reporting is recommended.
    /// Default: 1000
    pub automation_rows: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            type_sample_size: 10,
            correlation_threshold: 0.3,
            strong_correlation_threshold: 0.7,
            max_correlation_columns: 200,
            min_outlier_values: 5,
            forecast_columns: 2,
            quality_alert_threshold: 80,
            large_dataset_rows: 5000,
            automation_rows: 1000,
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        for (field, value) in [
            ("correlation_threshold", self.correlation_threshold),
            ("strong_correlation_threshold", self.strong_correlation_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigValidationError::InvalidThreshold {
                    field: field.to_string(),
                    value,
                });
            }
        }

        if self.strong_correlation_threshold < self.correlation_threshold {
            return Err(ConfigValidationError::InvertedCorrelationThresholds {
                base: self.correlation_threshold,
                strong: self.strong_correlation_threshold,
            });
        }

        if self.type_sample_size == 0 {
            return Err(ConfigValidationError::InvalidSampleSize(self.type_sample_size));
        }

        for (field, value) in [
            ("max_correlation_columns", self.max_correlation_columns),
            ("min_outlier_values", self.min_outlier_values),
            ("forecast_columns", self.forecast_columns),
        ] {
            if value == 0 {
                return Err(ConfigValidationError::ZeroCount(field.to_string()));
            }
        }

        if self.quality_alert_threshold > 100 {
            return Err(ConfigValidationError::InvalidQualityThreshold(
                self.quality_alert_threshold,
            ));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid threshold for '{field}': {value} (must be between 0.0 and 1.0)")]
    InvalidThreshold { field: String, value: f64 },

    #[error("Strong correlation threshold {strong} is below the base threshold {base}")]
    InvertedCorrelationThresholds { base: f64, strong: f64 },

    #[error("Invalid type sample size: {0} (must be at least 1)")]
    InvalidSampleSize(usize),

    #[error("Invalid value for '{0}': must be at least 1")]
    ZeroCount(String),

    #[error("Invalid quality alert threshold: {0} (must be at most 100)")]
    InvalidQualityThreshold(u8),
}

/// Builder for [`AnalysisConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    type_sample_size: Option<usize>,
    correlation_threshold: Option<f64>,
    strong_correlation_threshold: Option<f64>,
    max_correlation_columns: Option<usize>,
    min_outlier_values: Option<usize>,
    forecast_columns: Option<usize>,
    quality_alert_threshold: Option<u8>,
    large_dataset_rows: Option<usize>,
    automation_rows: Option<usize>,
}

impl AnalysisConfigBuilder {
    /// Set how many leading non-missing values are sampled per column.
    pub fn type_sample_size(mut self, size: usize) -> Self {
        self.type_sample_size = Some(size);
        self
    }

    /// Set the minimum absolute coefficient for reported correlations.
    ///
    /// # Arguments
    /// * `threshold` - Value between 0.0 and 1.0
    pub fn correlation_threshold(mut self, threshold: f64) -> Self {
        self.correlation_threshold = Some(threshold);
        self
    }

    /// Set the coefficient above which a correlation is considered strong.
    pub fn strong_correlation_threshold(mut self, threshold: f64) -> Self {
        self.strong_correlation_threshold = Some(threshold);
        self
    }

    /// Cap the number of numeric columns paired during correlation discovery.
    pub fn max_correlation_columns(mut self, max: usize) -> Self {
        self.max_correlation_columns = Some(max);
        self
    }

    /// Set the minimum numeric value count for outlier detection.
    pub fn min_outlier_values(mut self, min: usize) -> Self {
        self.min_outlier_values = Some(min);
        self
    }

    /// Set how many numeric columns receive a forecast.
    pub fn forecast_columns(mut self, count: usize) -> Self {
        self.forecast_columns = Some(count);
        self
    }

    /// Set the quality score under which cleaning is flagged.
    pub fn quality_alert_threshold(mut self, threshold: u8) -> Self {
        self.quality_alert_threshold = Some(threshold);
        self
    }

    /// Set the row count above which the dataset is considered large.
    pub fn large_dataset_rows(mut self, rows: usize) -> Self {
        self.large_dataset_rows = Some(rows);
        self
    }

    /// Set the row count above which automated reporting is recommended.
    pub fn automation_rows(mut self, rows: usize) -> Self {
        self.automation_rows = Some(rows);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `AnalysisConfig` or an error if validation fails.
    pub fn build(self) -> Result<AnalysisConfig, ConfigValidationError> {
        let defaults = AnalysisConfig::default();
        let config = AnalysisConfig {
            type_sample_size: self.type_sample_size.unwrap_or(defaults.type_sample_size),
            correlation_threshold: self
                .correlation_threshold
                .unwrap_or(defaults.correlation_threshold),
            strong_correlation_threshold: self
                .strong_correlation_threshold
                .unwrap_or(defaults.strong_correlation_threshold),
            max_correlation_columns: self
                .max_correlation_columns
                .unwrap_or(defaults.max_correlation_columns),
            min_outlier_values: self.min_outlier_values.unwrap_or(defaults.min_outlier_values),
            forecast_columns: self.forecast_columns.unwrap_or(defaults.forecast_columns),
            quality_alert_threshold: self
                .quality_alert_threshold
                .unwrap_or(defaults.quality_alert_threshold),
            large_dataset_rows: self.large_dataset_rows.unwrap_or(defaults.large_dataset_rows),
            automation_rows: self.automation_rows.unwrap_or(defaults.automation_rows),
        };

        config.validate()?;
        Ok(config)
    }
}
