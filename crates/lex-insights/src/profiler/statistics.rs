//! Per-column counts shared by the quality, pattern and forecast stages.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;

/// Value counts for one column, computed in a single pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub index: usize,
    pub name: String,
    /// Non-missing cells.
    pub valid_count: usize,
    /// Non-missing cells that coerce to a finite number.
    pub numeric_count: usize,
    /// Distinct non-missing values.
    pub distinct_count: usize,
}

impl ColumnProfile {
    /// Every non-missing value is numeric, and there is at least one.
    pub fn is_numeric(&self) -> bool {
        self.valid_count > 0 && self.numeric_count == self.valid_count
    }

    /// More than half of the non-missing values are numeric.
    pub fn is_mostly_numeric(&self) -> bool {
        self.valid_count > 0 && self.numeric_count as f64 > self.valid_count as f64 * 0.5
    }

    /// Fraction of non-missing values that are not numeric.
    pub fn non_numeric_fraction(&self) -> f64 {
        if self.valid_count == 0 {
            return 0.0;
        }
        (self.valid_count - self.numeric_count) as f64 / self.valid_count as f64
    }

    /// More than one distinct value, but fewer than half as many as valid values.
    pub fn is_categorical(&self) -> bool {
        self.distinct_count > 1 && (self.distinct_count as f64) < self.valid_count as f64 * 0.5
    }
}

pub(crate) fn profile_column(dataset: &Dataset, index: usize) -> ColumnProfile {
    let mut valid_count = 0;
    let mut numeric_count = 0;
    let mut distinct = HashSet::new();

    for cell in dataset.valid_cells(index) {
        valid_count += 1;
        if cell.as_number().is_some() {
            numeric_count += 1;
        }
        distinct.insert(cell.distinct_key());
    }

    ColumnProfile {
        index,
        name: dataset.headers()[index].clone(),
        valid_count,
        numeric_count,
        distinct_count: distinct.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Cell;

    fn profile(values: Vec<Cell>) -> ColumnProfile {
        let dataset = Dataset::new(
            vec!["col".to_string()],
            values.into_iter().map(|v| vec![v]).collect(),
        );
        profile_column(&dataset, 0)
    }

    #[test]
    fn test_numeric_profile() {
        let p = profile(vec![Cell::from(1.0), Cell::from("2"), Cell::Missing]);
        assert_eq!(p.valid_count, 2);
        assert_eq!(p.numeric_count, 2);
        assert!(p.is_numeric());
        assert!(p.is_mostly_numeric());
        assert_eq!(p.non_numeric_fraction(), 0.0);
    }

    #[test]
    fn test_mixed_profile() {
        let p = profile(vec![
            Cell::from("1"),
            Cell::from("2"),
            Cell::from("3"),
            Cell::from("x"),
        ]);
        assert!(!p.is_numeric());
        assert!(p.is_mostly_numeric());
        assert_eq!(p.non_numeric_fraction(), 0.25);
    }

    #[test]
    fn test_exactly_half_numeric_is_not_mostly_numeric() {
        let p = profile(vec![Cell::from("1"), Cell::from("x")]);
        assert!(!p.is_mostly_numeric());
    }

    #[test]
    fn test_empty_column() {
        let p = profile(vec![Cell::Missing, Cell::from("")]);
        assert_eq!(p.valid_count, 0);
        assert!(!p.is_numeric());
        assert!(!p.is_mostly_numeric());
        assert!(!p.is_categorical());
    }

    #[test]
    fn test_categorical() {
        let values = ["A", "B", "A", "B", "A"].map(Cell::from).to_vec();
        assert!(profile(values).is_categorical());

        let unique = ["A", "B", "C"].map(Cell::from).to_vec();
        assert!(!profile(unique).is_categorical());

        let constant = ["A", "A", "A"].map(Cell::from).to_vec();
        assert!(!profile(constant).is_categorical());
    }

    #[test]
    fn test_number_and_text_are_distinct_values() {
        let p = profile(vec![Cell::from(100.0), Cell::from("100")]);
        assert_eq!(p.distinct_count, 2);
    }
}
