//! Rule-based recommendation generation.

use tracing::debug;

use crate::config::AnalysisConfig;
use crate::dataset::Dataset;
use crate::types::{DataAnalysis, Insight, Priority, Recommendation, Timeframe};

/// Turns findings into prioritized, actionable recommendations.
///
/// Each rule maps to one fixed template; rules are evaluated in a fixed order.
pub struct RecommendationGenerator {
    config: AnalysisConfig,
}

impl RecommendationGenerator {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn generate(
        &self,
        dataset: &Dataset,
        analysis: &DataAnalysis,
        insights: &[Insight],
    ) -> Vec<Recommendation> {
        let mut recommendations = Vec::new();

        if analysis.summary.data_quality < self.config.quality_alert_threshold {
            recommendations.push(improve_data_quality());
        }

        if analysis.has_correlation_above(self.config.strong_correlation_threshold) {
            recommendations.push(leverage_correlations());
        }

        if dataset.row_count() > self.config.automation_rows {
            recommendations.push(automate_reporting());
        }

        if !analysis.forecasts.is_empty() {
            recommendations.push(implement_forecasting());
        }

        debug!(
            "Generated {} recommendations from {} insights",
            recommendations.len(),
            insights.len()
        );
        recommendations
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn improve_data_quality() -> Recommendation {
    Recommendation {
        id: "improve-data-quality".to_string(),
        title: "Implement a Data Cleaning Process".to_string(),
        description: "Establish data validation and cleaning routines to improve the quality of future analyses.".to_string(),
        priority: Priority::High,
        timeframe: Timeframe::ShortTerm,
        expected_impact: "15-25% improvement in analysis reliability".to_string(),
        resources: strings(&["Data Analyst", "ETL tools", "Process documentation"]),
        kpis: strings(&["Data completeness rate", "Quality index", "Processing time"]),
    }
}

fn leverage_correlations() -> Recommendation {
    Recommendation {
        id: "leverage-correlations".to_string(),
        title: "Explore the Identified Relationships".to_string(),
        description: "Investigate the strong correlations found to uncover optimization and forecasting opportunities.".to_string(),
        priority: Priority::Medium,
        timeframe: Timeframe::MediumTerm,
        expected_impact: "Potential 10-20% improvement in forecast accuracy".to_string(),
        resources: strings(&["Data Scientist", "Advanced analytics tools"]),
        kpis: strings(&[
            "Forecast accuracy",
            "Response time to changes",
            "ROI of data-driven decisions",
        ]),
    }
}

fn automate_reporting() -> Recommendation {
    Recommendation {
        id: "automate-reporting".to_string(),
        title: "Automate Report Generation".to_string(),
        description: "Set up automated dashboards for continuous monitoring of the identified KPIs.".to_string(),
        priority: Priority::Medium,
        timeframe: Timeframe::MediumTerm,
        expected_impact: "60-80% reduction in report generation time".to_string(),
        resources: strings(&["BI Developer", "BI platform", "User training"]),
        kpis: strings(&["Report generation time", "Update frequency", "User adoption"]),
    }
}

fn implement_forecasting() -> Recommendation {
    Recommendation {
        id: "implement-forecasting".to_string(),
        title: "Develop Predictive Models".to_string(),
        description: "Build forecasting models on the identified patterns to support strategic planning.".to_string(),
        priority: Priority::High,
        timeframe: Timeframe::LongTerm,
        expected_impact: "25-40% improvement in planning accuracy".to_string(),
        resources: strings(&["Data Scientist", "ML infrastructure", "Historical data"]),
        kpis: strings(&[
            "Forecast accuracy",
            "Lead time",
            "Impact on strategic decisions",
        ]),
    }
}
