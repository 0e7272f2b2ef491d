use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

use crate::charts::{ChartSuggester, ChartSuggestion};
use crate::dataset::Dataset;
use crate::error::{InsightsError, Result};
use crate::types::{DataAnalysis, Insight, Priority, Recommendation};

// ============================================================================
// Report Types
// ============================================================================

/// Everything produced for one dataset, in a single serializable document.
///
/// Used for both JSON output (`--json`) and file writing (`--emit-report`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    pub source: SourceInfo,
    pub analysis: DataAnalysis,
    pub insights: Vec<Insight>,
    pub recommendations: Vec<Recommendation>,
    pub charts: Vec<ChartSuggestion>,
}

/// Passthrough metadata about the analyzed data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceInfo {
    pub file_name: String,
    pub file_type: String,
    pub rows: usize,
    pub columns: usize,
}

impl AnalysisReport {
    /// Recommendations with high or critical priority.
    pub fn urgent_recommendations(&self) -> impl Iterator<Item = &Recommendation> + '_ {
        self.recommendations
            .iter()
            .filter(|r| r.priority <= Priority::High)
    }
}

// ============================================================================
// Report Generator
// ============================================================================

/// Assembles analysis reports and writes them to disk.
pub struct ReportGenerator {
    output_dir: PathBuf,
}

impl ReportGenerator {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    /// Bundle analysis results with source metadata and chart suggestions.
    pub fn build_report(
        dataset: &Dataset,
        analysis: DataAnalysis,
        insights: Vec<Insight>,
        recommendations: Vec<Recommendation>,
    ) -> AnalysisReport {
        let charts = ChartSuggester::suggest(dataset, &analysis.column_types);

        AnalysisReport {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            source: SourceInfo {
                file_name: dataset.file_name().to_string(),
                file_type: dataset.file_type().to_string(),
                rows: dataset.row_count(),
                columns: dataset.column_count(),
            },
            analysis,
            insights,
            recommendations,
            charts,
        }
    }

    /// Write the report as pretty JSON to `<output_dir>/<base_name>_report.json`.
    pub fn write_report_to_file(&self, report: &AnalysisReport, base_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir).map_err(|e| {
            InsightsError::Io(e).with_context(format!("Creating {}", self.output_dir.display()))
        })?;

        let report_path = self.output_dir.join(format!("{base_name}_report.json"));
        let mut file = File::create(&report_path)?;
        file.write_all(serde_json::to_string_pretty(report)?.as_bytes())?;

        info!("Report saved: {}", report_path.display());

        Ok(report_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::DataAnalyzer;
    use crate::dataset::Cell;

    fn dataset() -> Dataset {
        Dataset::new(
            vec!["Region".to_string(), "Sales".to_string(), "Cost".to_string()],
            (1..=6)
                .map(|i| {
                    vec![
                        Cell::from(if i % 2 == 0 { "North" } else { "South" }),
                        Cell::from(i as f64 * 10.0),
                        Cell::from(i as f64 * 4.0),
                    ]
                })
                .collect(),
        )
        .with_file_name("sales.csv")
        .with_file_type("csv")
    }

    fn report() -> AnalysisReport {
        let dataset = dataset();
        let analyzer = DataAnalyzer::default();
        let analysis = analyzer.analyze(&dataset);
        let insights = analyzer.generate_insights(&dataset, &analysis);
        let recommendations = analyzer.generate_recommendations(&dataset, &analysis, &insights);
        ReportGenerator::build_report(&dataset, analysis, insights, recommendations)
    }

    #[test]
    fn test_build_report() {
        let report = report();

        assert_eq!(report.source.file_name, "sales.csv");
        assert_eq!(report.source.rows, 6);
        assert_eq!(report.source.columns, 3);
        assert_eq!(report.charts.len(), 3);
        assert!(!report.generated_at.is_empty());
        // strong Sales/Cost correlation and two forecasts
        assert!(report.urgent_recommendations().any(|r| r.id == "implement-forecasting"));
    }

    #[test]
    fn test_report_json_shape() {
        let json = serde_json::to_value(report()).unwrap();

        assert!(json["analysis"]["summary"]["data_quality"].is_u64());
        assert_eq!(json["analysis"]["column_types"]["Sales"], "number");
        assert_eq!(json["charts"][0]["type"], "bar");
        assert!(json["recommendations"].is_array());
    }

    #[test]
    fn test_write_report_to_file() {
        let dir = std::env::temp_dir().join(format!("lex-insights-report-{}", std::process::id()));
        let generator = ReportGenerator::new(dir.clone());

        let path = generator.write_report_to_file(&report(), "sales").unwrap();

        assert_eq!(path, dir.join("sales_report.json"));
        let written = fs::read_to_string(&path).unwrap();
        let parsed: AnalysisReport = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed.source.file_name, "sales.csv");

        fs::remove_dir_all(&dir).ok();
    }
}
