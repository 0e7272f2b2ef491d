//! Data quality scoring module.
//!
//! This module scores a dataset's completeness and overall quality
//! (duplicate rows, type inconsistencies) and derives trend hints.

mod analyzer;

pub use analyzer::{CATEGORICAL_TREND, MULTI_NUMERIC_TREND, QualityScorer, TEMPORAL_TREND};
