//! Chart suggestions derived from column types.
//!
//! This only describes which charts fit the data and which points they would
//! plot. Rendering is left to the caller.

use serde::{Deserialize, Serialize};

use crate::dataset::{Cell, Dataset};
use crate::types::{ColumnType, ColumnTypeMap};

/// Maximum number of suggestions returned.
pub const MAX_SUGGESTIONS: usize = 3;
/// Maximum number of points attached to a suggestion.
pub const MAX_CHART_POINTS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
}

/// A single `(x, y)` point; `x` keeps the raw cell, `y` is numeric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub x: Cell,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSuggestion {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub title: String,
    pub x_axis: String,
    pub y_axis: String,
    pub data: Vec<ChartPoint>,
}

pub struct ChartSuggester;

impl ChartSuggester {
    /// Suggest up to three charts.
    ///
    /// With a numeric (number or currency) and a text column: a bar chart and
    /// a pie chart of the first numeric column by the first text column. With
    /// two or more numeric columns: a line chart of the first numeric column
    /// against the first header.
    pub fn suggest(dataset: &Dataset, types: &ColumnTypeMap) -> Vec<ChartSuggestion> {
        let numeric: Vec<&str> = types
            .iter()
            .filter(|(_, ty)| ty.is_numeric_like())
            .map(|(name, _)| name)
            .collect();
        let text = types.columns_of(ColumnType::Text);

        let mut suggestions = Vec::new();

        if let (Some(&value), Some(&category)) = (numeric.first(), text.first()) {
            suggestions.push(ChartSuggestion {
                kind: ChartKind::Bar,
                title: format!("{value} by {category}"),
                x_axis: category.to_string(),
                y_axis: value.to_string(),
                data: Self::prepare_points(dataset, category, value),
            });
            suggestions.push(ChartSuggestion {
                kind: ChartKind::Pie,
                title: format!("Distribution by {category}"),
                x_axis: category.to_string(),
                y_axis: value.to_string(),
                data: Self::prepare_points(dataset, category, value),
            });
        }

        if numeric.len() >= 2
            && let Some(x_axis) = dataset.headers().first()
        {
            let value = numeric[0];
            suggestions.push(ChartSuggestion {
                kind: ChartKind::Line,
                title: format!("Trend of {value}"),
                x_axis: x_axis.clone(),
                y_axis: value.to_string(),
                data: Self::prepare_points(dataset, x_axis, value),
            });
        }

        suggestions.truncate(MAX_SUGGESTIONS);
        suggestions
    }

    /// Points from rows where both cells are truthy, capped at
    /// [`MAX_CHART_POINTS`]. Columns are located by their first header match.
    pub fn prepare_points(dataset: &Dataset, x_column: &str, y_column: &str) -> Vec<ChartPoint> {
        let (Some(x_index), Some(y_index)) =
            (dataset.column_index(x_column), dataset.column_index(y_column))
        else {
            return Vec::new();
        };

        (0..dataset.row_count())
            .map(|row| (dataset.cell(row, x_index), dataset.cell(row, y_index)))
            .filter(|(x, y)| x.is_truthy() && y.is_truthy())
            .take(MAX_CHART_POINTS)
            .map(|(x, y)| ChartPoint {
                x: x.clone(),
                y: y.zero_filled(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiler::TypeInferencer;

    fn sales() -> Dataset {
        Dataset::new(
            vec!["Region".to_string(), "Sales".to_string(), "Units".to_string()],
            vec![
                vec![Cell::from("North"), Cell::from(100.0), Cell::from(5.0)],
                vec![Cell::from("South"), Cell::from(0.0), Cell::from(3.0)],
                vec![Cell::Missing, Cell::from(50.0), Cell::from(2.0)],
                vec![Cell::from("East"), Cell::from("$10"), Cell::from(1.0)],
            ],
        )
    }

    fn suggest(dataset: &Dataset) -> Vec<ChartSuggestion> {
        ChartSuggester::suggest(dataset, &TypeInferencer::detect_data_types(dataset, 10))
    }

    #[test]
    fn test_bar_pie_and_line() {
        let charts = suggest(&sales());
        let kinds: Vec<ChartKind> = charts.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![ChartKind::Bar, ChartKind::Pie, ChartKind::Line]);
    }

    #[test]
    fn test_titles_and_axes() {
        let charts = suggest(&Dataset::new(
            vec!["Region".to_string(), "Units".to_string(), "Cost".to_string()],
            vec![vec![Cell::from("North"), Cell::from(1.0), Cell::from(2.0)]],
        ));

        assert_eq!(charts[0].title, "Units by Region");
        assert_eq!(charts[1].title, "Distribution by Region");
        assert_eq!(charts[2].title, "Trend of Units");
        assert_eq!(charts[2].x_axis, "Region");
        assert_eq!(charts[2].y_axis, "Units");
    }

    #[test]
    fn test_points_skip_falsy_cells() {
        let points = ChartSuggester::prepare_points(&sales(), "Region", "Units");
        let xs: Vec<String> = points.iter().map(|p| p.x.to_string()).collect();
        assert_eq!(xs, vec!["North", "South", "East"]);

        // zero and missing Sales rows are dropped, currency text coerces to zero
        let points = ChartSuggester::prepare_points(&sales(), "Region", "Sales");
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].y, 0.0);
    }

    #[test]
    fn test_points_capped() {
        let dataset = Dataset::new(
            vec!["k".to_string(), "v".to_string()],
            (1..=50)
                .map(|i| vec![Cell::from(format!("k{i}")), Cell::from(i as f64)])
                .collect(),
        );
        assert_eq!(
            ChartSuggester::prepare_points(&dataset, "k", "v").len(),
            MAX_CHART_POINTS
        );
    }

    #[test]
    fn test_no_suggestions_for_text_only() {
        let dataset = Dataset::new(
            vec!["a".to_string()],
            vec![vec![Cell::from("x")]],
        );
        assert!(suggest(&dataset).is_empty());
    }

    #[test]
    fn test_unknown_columns_give_no_points() {
        assert!(ChartSuggester::prepare_points(&sales(), "Nope", "Sales").is_empty());
    }

    #[test]
    fn test_chart_kind_wire_names() {
        for (kind, name) in [
            (ChartKind::Bar, r#""bar""#),
            (ChartKind::Line, r#""line""#),
            (ChartKind::Pie, r#""pie""#),
        ] {
            assert_eq!(serde_json::to_string(&kind).unwrap(), name);
        }
        assert!(serde_json::from_str::<ChartKind>(r#""doughnut""#).is_err());
    }
}
