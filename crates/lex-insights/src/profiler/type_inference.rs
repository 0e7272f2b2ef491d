//! Type inference logic for column analysis.

use tracing::debug;

use crate::dataset::{Cell, Dataset};
use crate::types::{ColumnType, ColumnTypeMap};
use crate::utils::is_currency_string;

/// Classifies columns as number, currency, date or text.
pub struct TypeInferencer;

impl TypeInferencer {
    /// Infer the type of every column from its first `sample_size`
    /// non-missing values.
    ///
    /// Columns with no values at all are text.
    pub fn detect_data_types(dataset: &Dataset, sample_size: usize) -> ColumnTypeMap {
        let mut types = ColumnTypeMap::new();

        for (index, header) in dataset.headers().iter().enumerate() {
            let sample: Vec<&Cell> = dataset.valid_cells(index).take(sample_size).collect();
            let column_type = infer_column_type(&sample);
            debug!(
                "Column '{}' inferred as {} from {} samples",
                header,
                column_type,
                sample.len()
            );
            types.insert(header.clone(), column_type);
        }

        types
    }
}

/// Classify a sample of non-missing cells. The first matching rule wins:
/// currency, then number, then date, then text.
pub(crate) fn infer_column_type(sample: &[&Cell]) -> ColumnType {
    if sample.is_empty() {
        return ColumnType::Text;
    }

    // Check 1: any currency-formatted value
    if sample
        .iter()
        .any(|cell| is_currency_string(&cell.to_string()))
    {
        return ColumnType::Currency;
    }

    // Check 2: every value numeric
    if sample.iter().all(|cell| cell.as_number().is_some()) {
        return ColumnType::Number;
    }

    // Check 3: any value parses as a date
    if sample.iter().any(|cell| cell.is_date()) {
        return ColumnType::Date;
    }

    ColumnType::Text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(values: &[&str]) -> Dataset {
        Dataset::new(
            vec!["col".to_string()],
            values.iter().map(|v| vec![Cell::from(*v)]).collect(),
        )
    }

    fn infer(values: &[&str]) -> ColumnType {
        TypeInferencer::detect_data_types(&column(values), 10)
            .get("col")
            .unwrap()
    }

    #[test]
    fn test_number_column() {
        assert_eq!(infer(&["1", "2.5", "-3"]), ColumnType::Number);
    }

    #[test]
    fn test_currency_wins_over_other_rules() {
        assert_eq!(infer(&["$10", "$20", "30"]), ColumnType::Currency);
        assert_eq!(infer(&["R$ 10,50", "abc"]), ColumnType::Currency);
    }

    #[test]
    fn test_date_column() {
        assert_eq!(infer(&["2024-01-01", "2024-01-02"]), ColumnType::Date);
        // one date is enough
        assert_eq!(infer(&["n/a", "2024-01-02"]), ColumnType::Date);
    }

    #[test]
    fn test_text_column() {
        assert_eq!(infer(&["North", "South"]), ColumnType::Text);
        assert_eq!(infer(&["10", "ten"]), ColumnType::Text);
    }

    #[test]
    fn test_all_missing_is_text() {
        assert_eq!(infer(&["", ""]), ColumnType::Text);
        assert_eq!(infer(&[]), ColumnType::Text);
    }

    #[test]
    fn test_sample_skips_missing_and_stops_at_limit() {
        let mut values = vec![""; 3];
        values.extend(["1"; 10]);
        values.push("not a number");
        assert_eq!(infer(&values), ColumnType::Number);
    }

    #[test]
    fn test_native_cells() {
        assert_eq!(
            infer_column_type(&[&Cell::Number(1.0), &Cell::Bool(true)]),
            ColumnType::Number
        );
    }

    #[test]
    fn test_duplicate_headers_do_not_crash() {
        let dataset = Dataset::new(
            vec!["x".to_string(), "x".to_string()],
            vec![vec![Cell::from(1.0), Cell::from("abc")]],
        );
        let types = TypeInferencer::detect_data_types(&dataset, 10);
        assert_eq!(types.len(), 1);
        assert_eq!(types.get("x"), Some(ColumnType::Text));
    }
}
