//! The tabular dataset consumed by the analysis engine.
//!
//! A [`Dataset`] is an already-materialized grid of [`Cell`]s: ordered headers
//! and ordered rows. Rows may be shorter or longer than the header list; any
//! position outside a row reads as [`Cell::Missing`].

use std::fmt;

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ResultExt};
use crate::utils::{is_date_string, is_numeric_dtype, parse_numeric};

static MISSING: Cell = Cell::Missing;

/// A single spreadsheet cell.
///
/// Serializes untagged, so a row of cells looks like `[1.5, true, "abc", null]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Bool(bool),
    Text(String),
    Missing,
}

impl Cell {
    /// Absent, null and empty-string cells are all missing.
    pub fn is_missing(&self) -> bool {
        match self {
            Cell::Missing => true,
            Cell::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Numeric value of the cell, if it has one.
    ///
    /// Booleans coerce to `1`/`0` and text is parsed with
    /// [`parse_numeric`](crate::utils::parse_numeric).
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) if n.is_finite() => Some(*n),
            Cell::Number(_) | Cell::Missing => None,
            Cell::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Cell::Text(s) => parse_numeric(s),
        }
    }

    /// Numeric value with `0` substituted for missing or non-numeric cells.
    #[inline]
    pub fn zero_filled(&self) -> f64 {
        self.as_number().unwrap_or(0.0)
    }

    /// Whether the cell holds a non-missing numeric value.
    pub fn is_numeric(&self) -> bool {
        !self.is_missing() && self.as_number().is_some()
    }

    /// Whether the cell is text that parses as a date. Numbers are never dates.
    pub fn is_date(&self) -> bool {
        matches!(self, Cell::Text(s) if is_date_string(s))
    }

    /// Truthiness used when picking chart points: non-zero numbers, `true`
    /// and non-empty text.
    pub fn is_truthy(&self) -> bool {
        match self {
            Cell::Number(n) => *n != 0.0 && !n.is_nan(),
            Cell::Bool(b) => *b,
            Cell::Text(s) => !s.is_empty(),
            Cell::Missing => false,
        }
    }

    /// Key that distinguishes cells by both variant and content, so the number
    /// `100` and the text `"100"` never collide.
    pub fn distinct_key(&self) -> String {
        match self {
            Cell::Number(n) => format!("n:{n}"),
            Cell::Bool(b) => format!("b:{b}"),
            Cell::Text(s) => format!("t:{s}"),
            Cell::Missing => "m".to_string(),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(n) => write!(f, "{n}"),
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::Text(s) => f.write_str(s),
            Cell::Missing => Ok(()),
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Number(value as f64)
    }
}

impl From<i32> for Cell {
    fn from(value: i32) -> Self {
        Cell::Number(f64::from(value))
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Bool(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Cell::Missing
        } else {
            Cell::Text(value.to_string())
        }
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        if value.is_empty() {
            Cell::Missing
        } else {
            Cell::Text(value)
        }
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Cell::Missing, Into::into)
    }
}

/// An in-memory table of cells plus passthrough source metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
    file_name: String,
    file_type: String,
}

impl Dataset {
    /// Create a dataset from headers and rows.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            headers,
            rows,
            file_name: String::new(),
            file_type: String::new(),
        }
    }

    /// Set the name of the file the data came from.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Set the declared file-format tag (e.g. `"csv"`).
    pub fn with_file_type(mut self, file_type: impl Into<String>) -> Self {
        self.file_type = file_type.into();
        self
    }

    /// Convert a polars `DataFrame` into a dataset.
    ///
    /// Nulls become [`Cell::Missing`], numeric columns become numbers, boolean
    /// columns become booleans and string columns become text (empty strings
    /// are missing). Any other dtype is rendered as a string first.
    pub fn from_dataframe(
        df: &DataFrame,
        file_name: impl Into<String>,
        file_type: impl Into<String>,
    ) -> Result<Self> {
        let headers: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        let mut rows: Vec<Vec<Cell>> = vec![Vec::with_capacity(headers.len()); df.height()];

        for column in df.get_columns() {
            let series = column.as_materialized_series();
            let cells = series_to_cells(series)
                .context(format!("Converting column '{}'", series.name()))?;
            for (row, cell) in rows.iter_mut().zip(cells) {
                row.push(cell);
            }
        }

        debug!(
            "Converted DataFrame with {} rows x {} columns",
            rows.len(),
            headers.len()
        );

        Ok(Self::new(headers, rows)
            .with_file_name(file_name)
            .with_file_type(file_type))
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn file_type(&self) -> &str {
        &self.file_type
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of header columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.headers.is_empty()
    }

    /// Index of the first header with the given name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell at `(row, column)`; out-of-range positions are missing.
    pub fn cell(&self, row: usize, column: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&MISSING)
    }

    /// Every cell of a column in row order, including missing ones.
    pub fn column_cells(&self, column: usize) -> impl Iterator<Item = &Cell> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(column).unwrap_or(&MISSING))
    }

    /// The non-missing cells of a column in row order.
    pub fn valid_cells(&self, column: usize) -> impl Iterator<Item = &Cell> + '_ {
        self.column_cells(column).filter(|cell| !cell.is_missing())
    }

    /// A column coerced to numbers across all rows, with `0` for anything
    /// missing or non-numeric.
    pub fn zero_filled_column(&self, column: usize) -> Vec<f64> {
        self.column_cells(column).map(Cell::zero_filled).collect()
    }
}

fn series_to_cells(series: &Series) -> PolarsResult<Vec<Cell>> {
    let dtype = series.dtype();
    let cells = if is_numeric_dtype(dtype) {
        let float_series = series.cast(&DataType::Float64)?;
        float_series
            .f64()?
            .into_iter()
            .map(|v| v.map_or(Cell::Missing, Cell::Number))
            .collect()
    } else if matches!(dtype, DataType::Boolean) {
        series
            .bool()?
            .into_iter()
            .map(|v| v.map_or(Cell::Missing, Cell::Bool))
            .collect()
    } else if matches!(dtype, DataType::String) {
        string_cells(series)?
    } else {
        string_cells(&series.cast(&DataType::String)?)?
    };
    Ok(cells)
}

fn string_cells(series: &Series) -> PolarsResult<Vec<Cell>> {
    Ok(series.str()?.into_iter().map(Cell::from).collect())
}
