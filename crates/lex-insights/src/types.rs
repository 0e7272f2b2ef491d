use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Column Types
// ============================================================================

/// Semantic type of a column, inferred from a sample of its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Number,
    Currency,
    Date,
    Text,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Number => "number",
            ColumnType::Currency => "currency",
            ColumnType::Date => "date",
            ColumnType::Text => "text",
        }
    }

    /// Number and currency columns can be plotted as values.
    pub fn is_numeric_like(&self) -> bool {
        matches!(self, ColumnType::Number | ColumnType::Currency)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column name to [`ColumnType`], kept in header order.
///
/// A repeated header name keeps the position of its first occurrence and the
/// type of its last one. Serializes as a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnTypeMap {
    entries: Vec<(String, ColumnType)>,
}

impl ColumnTypeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the type of a column.
    pub fn insert(&mut self, name: impl Into<String>, column_type: ColumnType) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = column_type,
            None => self.entries.push((name, column_type)),
        }
    }

    pub fn get(&self, name: &str) -> Option<ColumnType> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, column_type)| *column_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ColumnType)> + '_ {
        self.entries.iter().map(|(name, ty)| (name.as_str(), *ty))
    }

    /// Names of the columns with the given type, in order.
    pub fn columns_of(&self, column_type: ColumnType) -> Vec<&str> {
        self.iter()
            .filter(|(_, ty)| *ty == column_type)
            .map(|(name, _)| name)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ColumnTypeMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_map(self.entries.iter().map(|(name, ty)| (name, ty)))
    }
}

impl<'de> Deserialize<'de> for ColumnTypeMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct MapVisitor;

        impl<'de> serde::de::Visitor<'de> for MapVisitor {
            type Value = ColumnTypeMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of column names to column types")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut map = ColumnTypeMap::new();
                while let Some((name, ty)) = access.next_entry::<String, ColumnType>()? {
                    map.insert(name, ty);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(MapVisitor)
    }
}

// ============================================================================
// Analysis Results
// ============================================================================

/// Dataset-level quality figures and trend hints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total_records: usize,
    /// Quality score in `[0, 100]`.
    pub data_quality: u8,
    /// Share of non-missing cells in `[0, 100]`.
    pub completeness: u8,
    pub trends: Vec<String>,
}

/// A pair of numeric columns with a notable linear relationship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationRecord {
    /// The two column names, in header order.
    pub variables: [String; 2],
    /// Absolute Pearson coefficient, in `[0, 1]`.
    pub strength: f64,
    pub significance: f64,
}

/// Severity of a column's outliers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutlierImpact {
    /// More than 10% of the column's numeric values are outliers.
    #[serde(rename = "Alto")]
    High,
    #[serde(rename = "Moderado")]
    Moderate,
}

impl OutlierImpact {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutlierImpact::High => "Alto",
            OutlierImpact::Moderate => "Moderado",
        }
    }
}

/// Values of one column that fall outside its IQR fences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierRecord {
    pub field: String,
    /// Outlying values in row order.
    pub values: Vec<f64>,
    pub impact: OutlierImpact,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

/// A recurring cycle in a metric. Not produced yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalPattern {
    pub field: String,
    pub period: usize,
    pub strength: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Patterns {
    pub correlations: Vec<CorrelationRecord>,
    pub outliers: Vec<OutlierRecord>,
    pub seasonality: Vec<SeasonalPattern>,
}

/// One projected step of a forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub period: String,
    pub value: i64,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    pub metric: String,
    pub predictions: Vec<Prediction>,
}

/// Full statistical profile of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataAnalysis {
    pub column_types: ColumnTypeMap,
    pub summary: AnalysisSummary,
    pub patterns: Patterns,
    pub forecasts: Vec<ForecastRecord>,
}

impl DataAnalysis {
    /// Whether any correlation exceeds the given strength.
    pub fn has_correlation_above(&self, threshold: f64) -> bool {
        self.patterns
            .correlations
            .iter()
            .any(|c| c.strength > threshold)
    }
}

// ============================================================================
// Insights and Recommendations
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightCategory {
    Performance,
    Trend,
    Opportunity,
    Risk,
}

/// A human-readable finding derived from the analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub id: String,
    pub title: String,
    pub description: String,
    pub impact: Impact,
    pub category: InsightCategory,
    /// Finding-specific payload (scores, column names, outlier values).
    pub supporting_data: serde_json::Value,
    /// Confidence in `[0, 100]`.
    pub confidence: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Timeframe {
    Immediate,
    ShortTerm,
    MediumTerm,
    LongTerm,
}

/// An actionable step suggested by the findings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub timeframe: Timeframe,
    pub expected_impact: String,
    pub resources: Vec<String>,
    pub kpis: Vec<String>,
}

static_assertions::assert_impl_all!(DataAnalysis: Send, Sync);
static_assertions::assert_impl_all!(Insight: Send, Sync);
static_assertions::assert_impl_all!(Recommendation: Send, Sync);
