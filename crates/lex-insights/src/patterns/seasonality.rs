use crate::dataset::Dataset;
use crate::types::SeasonalPattern;

/// Seasonality detection. Periodicity is not analyzed yet, so the list is
/// always empty.
pub fn detect_seasonality(_dataset: &Dataset) -> Vec<SeasonalPattern> {
    Vec::new()
}
