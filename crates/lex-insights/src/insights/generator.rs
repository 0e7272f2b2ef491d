//! Rule-based insight generation.

use serde_json::json;
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::dataset::Dataset;
use crate::types::{
    CorrelationRecord, DataAnalysis, Impact, Insight, InsightCategory, OutlierImpact,
    OutlierRecord,
};
use crate::utils::{format_thousands, round_half_up};

const QUALITY_CONFIDENCE: u8 = 90;
const OUTLIER_CONFIDENCE: u8 = 85;
const LARGE_DATASET_CONFIDENCE: u8 = 95;

/// Turns analysis signals into human-readable findings.
///
/// Rules are evaluated in a fixed order: data quality, strong correlations,
/// high-impact outliers, dataset size.
pub struct InsightGenerator {
    config: AnalysisConfig,
}

impl InsightGenerator {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn generate(&self, dataset: &Dataset, analysis: &DataAnalysis) -> Vec<Insight> {
        let mut insights = Vec::new();

        if analysis.summary.data_quality < self.config.quality_alert_threshold {
            insights.push(Self::quality_insight(analysis.summary.data_quality));
        }

        insights.extend(
            analysis
                .patterns
                .correlations
                .iter()
                .filter(|c| c.strength > self.config.strong_correlation_threshold)
                .map(Self::correlation_insight),
        );

        insights.extend(
            analysis
                .patterns
                .outliers
                .iter()
                .filter(|o| o.impact == OutlierImpact::High)
                .map(Self::outlier_insight),
        );

        if dataset.row_count() > self.config.large_dataset_rows {
            insights.push(Self::large_dataset_insight(dataset.row_count()));
        }

        debug!("Generated {} insights", insights.len());
        insights
    }

    fn quality_insight(score: u8) -> Insight {
        Insight {
            id: "data-quality".to_string(),
            title: "Data Quality Needs Attention".to_string(),
            description: format!(
                "Data quality is at {score}%, indicating inconsistencies that may affect the analysis."
            ),
            impact: Impact::High,
            category: InsightCategory::Risk,
            supporting_data: json!([score]),
            confidence: QUALITY_CONFIDENCE,
        }
    }

    fn correlation_insight(correlation: &CorrelationRecord) -> Insight {
        let [first, second] = &correlation.variables;
        Insight {
            id: format!("correlation-{first}-{second}"),
            title: "Strong Correlation Identified".to_string(),
            description: format!(
                "{first} and {second} show a correlation of {:.1}%, suggesting a significant relationship.",
                correlation.strength * 100.0
            ),
            impact: Impact::Medium,
            category: InsightCategory::Opportunity,
            supporting_data: json!(correlation.variables),
            confidence: round_half_up(correlation.significance * 100.0).clamp(0.0, 100.0) as u8,
        }
    }

    fn outlier_insight(outlier: &OutlierRecord) -> Insight {
        Insight {
            id: format!("outlier-{}", outlier.field),
            title: format!("Outliers in {}", outlier.field),
            description: format!(
                "Detected {} outliers in {}, which may indicate data errors or exceptional events.",
                outlier.values.len(),
                outlier.field
            ),
            impact: Impact::Medium,
            category: InsightCategory::Risk,
            supporting_data: json!(outlier.values),
            confidence: OUTLIER_CONFIDENCE,
        }
    }

    fn large_dataset_insight(rows: usize) -> Insight {
        Insight {
            id: "large-dataset".to_string(),
            title: "Robust Dataset for Analysis".to_string(),
            description: format!(
                "With {} records, the dataset offers a solid base for reliable statistical analysis.",
                format_thousands(rows)
            ),
            impact: Impact::High,
            category: InsightCategory::Opportunity,
            supporting_data: json!([rows]),
            confidence: LARGE_DATASET_CONFIDENCE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Cell;
    use crate::types::{AnalysisSummary, ColumnTypeMap, Patterns};

    fn analysis(data_quality: u8, patterns: Patterns) -> DataAnalysis {
        DataAnalysis {
            column_types: ColumnTypeMap::new(),
            summary: AnalysisSummary {
                total_records: 0,
                data_quality,
                completeness: 100,
                trends: Vec::new(),
            },
            patterns,
            forecasts: Vec::new(),
        }
    }

    fn rows(count: usize) -> Dataset {
        Dataset::new(
            vec!["id".to_string()],
            (0..count).map(|i| vec![Cell::from(i as f64)]).collect(),
        )
    }

    fn outlier(field: &str, impact: OutlierImpact) -> OutlierRecord {
        OutlierRecord {
            field: field.to_string(),
            values: vec![100.0],
            impact,
            lower_bound: 8.0,
            upper_bound: 16.0,
        }
    }

    fn generate(dataset: &Dataset, analysis: &DataAnalysis) -> Vec<Insight> {
        InsightGenerator::new(AnalysisConfig::default()).generate(dataset, analysis)
    }

    #[test]
    fn test_no_insights_for_clean_small_dataset() {
        assert!(generate(&rows(10), &analysis(100, Patterns::default())).is_empty());
    }

    #[test]
    fn test_quality_insight() {
        let insights = generate(&rows(3), &analysis(79, Patterns::default()));

        assert_eq!(insights.len(), 1);
        let insight = &insights[0];
        assert_eq!(insight.id, "data-quality");
        assert_eq!(insight.category, InsightCategory::Risk);
        assert_eq!(insight.impact, Impact::High);
        assert_eq!(insight.confidence, 90);
        assert_eq!(insight.supporting_data, json!([79]));
        assert!(insight.description.contains("79%"));
    }

    #[test]
    fn test_quality_at_threshold_is_fine() {
        assert!(generate(&rows(3), &analysis(80, Patterns::default())).is_empty());
    }

    #[test]
    fn test_correlation_insight_only_for_strong() {
        let patterns = Patterns {
            correlations: vec![
                CorrelationRecord {
                    variables: ["Price".to_string(), "Revenue".to_string()],
                    strength: 0.923,
                    significance: 0.95,
                },
                CorrelationRecord {
                    variables: ["Price".to_string(), "Units".to_string()],
                    strength: 0.5,
                    significance: 0.75,
                },
            ],
            ..Patterns::default()
        };

        let insights = generate(&rows(3), &analysis(100, patterns));

        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].id, "correlation-Price-Revenue");
        assert_eq!(insights[0].confidence, 95);
        assert_eq!(insights[0].category, InsightCategory::Opportunity);
        assert!(insights[0].description.contains("92.3%"));
        assert_eq!(insights[0].supporting_data, json!(["Price", "Revenue"]));
    }

    #[test]
    fn test_outlier_insight_only_for_high_impact() {
        let patterns = Patterns {
            outliers: vec![
                outlier("Sales", OutlierImpact::High),
                outlier("Cost", OutlierImpact::Moderate),
            ],
            ..Patterns::default()
        };

        let insights = generate(&rows(3), &analysis(100, patterns));

        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].id, "outlier-Sales");
        assert_eq!(insights[0].title, "Outliers in Sales");
        assert_eq!(insights[0].confidence, 85);
        assert_eq!(insights[0].supporting_data, json!([100.0]));
    }

    #[test]
    fn test_large_dataset_insight() {
        let insights = generate(&rows(5001), &analysis(100, Patterns::default()));

        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].id, "large-dataset");
        assert_eq!(insights[0].confidence, 95);
        assert!(insights[0].description.contains("5,001"));

        assert!(generate(&rows(5000), &analysis(100, Patterns::default())).is_empty());
    }

    #[test]
    fn test_insight_order() {
        let patterns = Patterns {
            correlations: vec![CorrelationRecord {
                variables: ["a".to_string(), "b".to_string()],
                strength: 0.9,
                significance: 0.95,
            }],
            outliers: vec![outlier("a", OutlierImpact::High)],
            seasonality: Vec::new(),
        };

        let ids: Vec<String> = generate(&rows(6000), &analysis(50, patterns))
            .into_iter()
            .map(|i| i.id)
            .collect();

        assert_eq!(
            ids,
            vec!["data-quality", "correlation-a-b", "outlier-a", "large-dataset"]
        );
    }
}
