//! Insight and recommendation generation.
//!
//! Both generators are fixed rule lists over a [`DataAnalysis`](crate::types::DataAnalysis):
//! - [`InsightGenerator`] reports findings (quality, correlations, outliers, size)
//! - [`RecommendationGenerator`] maps findings to prioritized actions

mod generator;
mod recommendations;

pub use generator::InsightGenerator;
pub use recommendations::RecommendationGenerator;
