//! Naive linear forecasting for numeric metrics.
//!
//! Each projection starts from the column mean and adds a per-step trend
//! equal to `(last - first) / count`. It is a hint for the reader, not a
//! fitted model.

use tracing::debug;

use crate::config::AnalysisConfig;
use crate::dataset::Dataset;
use crate::profiler::ColumnProfile;
use crate::types::{ForecastRecord, Prediction};
use crate::utils::round_half_up;

/// Period label and confidence for each projected step.
const HORIZON: [(&str, f64); 3] = [("Next period", 0.75), ("2 periods", 0.65), ("3 periods", 0.55)];

pub struct Forecaster;

impl Forecaster {
    /// Forecast the first `config.forecast_columns` all-numeric columns.
    pub fn forecast(
        dataset: &Dataset,
        profiles: &[ColumnProfile],
        config: &AnalysisConfig,
    ) -> Vec<ForecastRecord> {
        let forecasts: Vec<ForecastRecord> = profiles
            .iter()
            .filter(|p| p.is_numeric())
            .take(config.forecast_columns)
            .map(|p| ForecastRecord {
                metric: p.name.clone(),
                predictions: Self::project(&dataset.zero_filled_column(p.index)),
            })
            .collect();

        debug!("Generated {} forecasts", forecasts.len());
        forecasts
    }

    /// Project three steps ahead from a series.
    ///
    /// An empty series projects zeros.
    pub fn project(values: &[f64]) -> Vec<Prediction> {
        let (average, trend) = match values {
            [] => (0.0, 0.0),
            [only] => (*only, 0.0),
            [first, .., last] => {
                let count = values.len() as f64;
                (values.iter().sum::<f64>() / count, (last - first) / count)
            }
        };

        HORIZON
            .iter()
            .zip(1_i32..)
            .map(|(&(period, confidence), step)| Prediction {
                period: period.to_string(),
                value: round_half_up(average + trend * f64::from(step)) as i64,
                confidence,
            })
            .collect()
    }
}
