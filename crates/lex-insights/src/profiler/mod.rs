//! Column profiling for dataset analysis.
//!
//! This module provides:
//! - Type inference (number, currency, date, text) from a value sample
//! - Per-column value counts used by the later analysis stages

mod statistics;
mod type_inference;

use crate::dataset::Dataset;

pub use statistics::ColumnProfile;
pub use type_inference::TypeInferencer;

/// Builds a [`ColumnProfile`] for every column of a dataset.
pub struct DataProfiler;

impl DataProfiler {
    /// Profile each header column in order. Duplicate header names get one
    /// profile per position.
    pub fn profile_columns(dataset: &Dataset) -> Vec<ColumnProfile> {
        (0..dataset.column_count())
            .map(|index| statistics::profile_column(dataset, index))
            .collect()
    }
}
