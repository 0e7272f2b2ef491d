//! CLI entry point for the automated insights engine.

use anyhow::{Context, Result, bail};
use clap::Parser;
use lex_insights::{
    AnalysisConfig, AnalysisReport, DataAnalyzer, Dataset, InsightsError, ReportGenerator,
};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Largest input file accepted, in bytes.
const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

#[derive(Parser, Debug)]
#[command(
    author = "Lex Machina Team",
    version,
    about = "Automated statistical insights for spreadsheet data",
    long_about = "Profiles a CSV file: data quality, column types, correlations, outliers,\n\
                  naive forecasts, insights and recommendations.\n\n\
                  EXAMPLES:\n  \
                  # Human-readable summary\n  \
                  lex-insights -i sales.csv\n\n  \
                  # Machine-readable output\n  \
                  lex-insights -i sales.csv --json | jq .insights\n\n  \
                  # Save a report and use a stricter correlation threshold\n  \
                  lex-insights -i sales.csv -r -o reports/ --correlation-threshold 0.5"
)]
struct Args {
    /// Path to the CSV file to analyze
    #[arg(short, long)]
    input: String,

    /// Output directory for reports
    #[arg(short, long, default_value = "./outputs")]
    output: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings, errors and the final result)
    #[arg(short, long)]
    quiet: bool,

    /// Output JSON to stdout instead of human-readable summary
    ///
    /// Disables all logs; only outputs the final JSON report.
    #[arg(long)]
    json: bool,

    /// Write a detailed JSON report to the output directory
    ///
    /// The report will be saved as <input_name>_report.json
    #[arg(short = 'r', long)]
    emit_report: bool,

    /// JSON file with analysis settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Minimum absolute correlation to report (0.0 - 1.0)
    #[arg(long)]
    correlation_threshold: Option<f64>,

    /// Correlation above which a relationship is considered strong (0.0 - 1.0)
    #[arg(long)]
    strong_correlation_threshold: Option<f64>,

    /// Quality score below which data cleaning is flagged (0 - 100)
    #[arg(long)]
    quality_threshold: Option<u8>,

    /// Row count above which the dataset is considered large
    #[arg(long)]
    large_dataset_rows: Option<usize>,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    let input = Path::new(&args.input);
    validate_input_file(input)?;

    let config = build_config(&args)?;
    debug!("Analysis config: {:?}", config);

    info!("Loading dataset from: {}", args.input);
    let df = load_csv_as_strings(input)?;
    info!("Dataset loaded successfully: {:?}", df.shape());

    let file_name = input
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(&args.input)
        .to_string();
    let dataset = Dataset::from_dataframe(&df, file_name, "csv")?;

    let analyzer = DataAnalyzer::new(config);
    let analysis = analyzer.analyze(&dataset);
    let insights = analyzer.generate_insights(&dataset, &analysis);
    let recommendations = analyzer.generate_recommendations(&dataset, &analysis, &insights);
    let report = ReportGenerator::build_report(&dataset, analysis, insights, recommendations);

    handle_output(&report, &args)
}

/// Reject inputs the loader cannot read before touching their contents.
fn validate_input_file(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("Input file not found: {}", path.display());
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "csv" => {}
        "xlsx" | "xls" => {
            return Err(InsightsError::UnsupportedFormat(extension.clone()))
                .context("Excel workbooks must be exported to CSV first");
        }
        other => return Err(InsightsError::UnsupportedFormat(other.to_string()).into()),
    }

    let size = std::fs::metadata(path)
        .with_context(|| format!("Reading metadata of {}", path.display()))?
        .len();
    if size > MAX_FILE_SIZE {
        return Err(InsightsError::FileTooLarge {
            size,
            limit: MAX_FILE_SIZE,
        }
        .into());
    }

    Ok(())
}

/// Defaults, then the optional JSON config file, then flag overrides.
fn build_config(args: &Args) -> Result<AnalysisConfig> {
    let base = match &args.config {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Reading config file {}", path.display()))?;
            serde_json::from_str::<AnalysisConfig>(&content)
                .with_context(|| format!("Parsing config file {}", path.display()))?
        }
        None => AnalysisConfig::default(),
    };

    let config = AnalysisConfig::builder()
        .type_sample_size(base.type_sample_size)
        .correlation_threshold(args.correlation_threshold.unwrap_or(base.correlation_threshold))
        .strong_correlation_threshold(
            args.strong_correlation_threshold
                .unwrap_or(base.strong_correlation_threshold),
        )
        .max_correlation_columns(base.max_correlation_columns)
        .min_outlier_values(base.min_outlier_values)
        .forecast_columns(base.forecast_columns)
        .quality_alert_threshold(args.quality_threshold.unwrap_or(base.quality_alert_threshold))
        .large_dataset_rows(args.large_dataset_rows.unwrap_or(base.large_dataset_rows))
        .automation_rows(base.automation_rows)
        .build()?;

    Ok(config)
}

/// Load a CSV with every column read as text, so the engine does its own
/// type inference on the raw values.
fn load_csv_as_strings(path: &Path) -> Result<DataFrame> {
    match CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()
    {
        Ok(df) => return Ok(df),
        Err(e) => {
            debug!("Standard loading failed: {}", e);
        }
    }

    // Fall back to dropping blank lines, which trip up the parser on some exports
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read file {}", path.display()))?;
    let cleaned = drop_blank_lines(&content);
    if cleaned.is_empty() {
        return Err(InsightsError::EmptyDataset(path.display().to_string()).into());
    }

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(cleaned))
        .finish()
        .with_context(|| format!("Failed to parse CSV {}", path.display()))
}

fn drop_blank_lines(content: &str) -> String {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Handle output based on CLI flags.
///
/// Output behavior:
/// - Default: Print human-readable summary to stdout
/// - `--json`: Print JSON to stdout only (no logs)
/// - `--emit-report`: Write JSON report to file
fn handle_output(report: &AnalysisReport, args: &Args) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    if args.emit_report {
        let input_stem = extract_file_stem(&args.input);
        let generator = ReportGenerator::new(PathBuf::from(&args.output));
        let report_path = generator.write_report_to_file(report, &input_stem)?;
        info!("Report written to: {}", report_path.display());
    }

    print_human_readable_summary(report);

    Ok(())
}

/// Extract the file stem (name without extension) from a path.
fn extract_file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string()
}

/// Print a human-readable summary of the analysis.
///
/// This is the default output when `--json` is not specified.
fn print_human_readable_summary(report: &AnalysisReport) {
    let analysis = &report.analysis;
    let summary = &analysis.summary;

    println!();
    println!("{}", "=".repeat(80));
    println!("ANALYSIS COMPLETE");
    println!("{}", "=".repeat(80));
    println!();

    println!(
        "Input: {} ({} rows x {} columns)",
        report.source.file_name, report.source.rows, report.source.columns
    );
    println!();

    println!("Data Summary:");
    println!("  Records: {}", summary.total_records);
    println!("  Data Quality: {}%", summary.data_quality);
    println!("  Completeness: {}%", summary.completeness);
    for trend in &summary.trends {
        println!("  * {}", trend);
    }
    println!();

    if !analysis.column_types.is_empty() {
        println!("Column Types:");
        for (name, column_type) in analysis.column_types.iter() {
            println!("  {:<30} {}", truncate_str(name, 29), column_type);
        }
        println!();
    }

    if !analysis.patterns.correlations.is_empty() {
        println!("Correlations:");
        for correlation in analysis.patterns.correlations.iter().take(10) {
            println!(
                "  {} <-> {}: {:.2} (significance {:.2})",
                correlation.variables[0],
                correlation.variables[1],
                correlation.strength,
                correlation.significance
            );
        }
        if analysis.patterns.correlations.len() > 10 {
            println!(
                "  ... and {} more",
                analysis.patterns.correlations.len() - 10
            );
        }
        println!();
    }

    if !analysis.patterns.outliers.is_empty() {
        println!("Outliers:");
        for outlier in &analysis.patterns.outliers {
            println!(
                "  {}: {} values outside [{:.2}, {:.2}] ({})",
                outlier.field,
                outlier.values.len(),
                outlier.lower_bound,
                outlier.upper_bound,
                outlier.impact.as_str()
            );
        }
        println!();
    }

    if !analysis.forecasts.is_empty() {
        println!("Forecasts:");
        for forecast in &analysis.forecasts {
            let steps: Vec<String> = forecast
                .predictions
                .iter()
                .map(|p| format!("{}: {} ({:.0}%)", p.period, p.value, p.confidence * 100.0))
                .collect();
            println!("  {}: {}", forecast.metric, steps.join(", "));
        }
        println!();
    }

    if !report.insights.is_empty() {
        println!("Insights:");
        for insight in &report.insights {
            println!("  - {} [confidence {}%]", insight.title, insight.confidence);
            println!("    {}", insight.description);
        }
        println!();
    }

    let urgent: Vec<_> = report.urgent_recommendations().collect();
    if !urgent.is_empty() {
        println!("Top Recommendations:");
        for recommendation in urgent {
            println!("  ! {}", recommendation.title);
            println!("    {}", recommendation.description);
            println!("    Expected impact: {}", recommendation.expected_impact);
        }
        println!();
    }

    if !report.charts.is_empty() {
        println!("Suggested Charts:");
        for chart in &report.charts {
            println!("  - {} ({:?})", chart.title, chart.kind);
        }
        println!();
    }

    println!("Use --json for machine-readable output");
    println!("Use --emit-report to save detailed JSON report");
    println!("{}", "=".repeat(80));
}

/// Truncate a string for table display, respecting char boundaries.
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scratch directory unique to one test, so tests can clean up in parallel.
    fn temp_dir(test: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "lex-insights-cli-{}-{}",
            std::process::id(),
            test
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn temp_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_validate_accepts_csv() {
        let dir = temp_dir("accepts-csv");
        let path = temp_file(&dir, "ok.csv", "a,b\n1,2\n");

        assert!(validate_input_file(&path).is_ok());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_validate_rejects_other_formats() {
        let dir = temp_dir("rejects-formats");

        let xlsx = temp_file(&dir, "book.xlsx", "");
        let err = validate_input_file(&xlsx).unwrap_err();
        assert!(format!("{err:#}").contains("Excel"));

        let txt = temp_file(&dir, "notes.txt", "");
        let err = validate_input_file(&txt).unwrap_err();
        assert!(err.to_string().contains("Unsupported file format"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_validate_missing_file() {
        assert!(validate_input_file(Path::new("/nonexistent/data.csv")).is_err());
    }

    #[test]
    fn test_load_csv_keeps_raw_strings() {
        let dir = temp_dir("raw-strings");
        let path = temp_file(&dir, "raw.csv", "id,amount\n001,$10\n002,\n003,5\n");

        let df = load_csv_as_strings(&path).unwrap();
        let dataset = Dataset::from_dataframe(&df, "raw.csv", "csv").unwrap();

        assert_eq!(dataset.headers(), &["id", "amount"]);
        assert_eq!(dataset.cell(0, 0).to_string(), "001");
        assert!(dataset.cell(1, 1).is_missing());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_scratch_directories_are_removed() {
        let dir = temp_dir("cleanup");
        let path = temp_file(&dir, "data.csv", "a\n1\n");
        assert!(validate_input_file(&path).is_ok());

        std::fs::remove_dir_all(&dir).ok();

        assert!(!dir.exists());
        assert!(
            !std::env::temp_dir()
                .join(format!("lex-insights-cli-{}", std::process::id()))
                .exists()
        );
    }

    #[test]
    fn test_drop_blank_lines() {
        assert_eq!(drop_blank_lines("a,b\n\n1,2\n   \n"), "a,b\n1,2");
    }

    #[test]
    fn test_extract_file_stem() {
        assert_eq!(extract_file_stem("data/sales.csv"), "sales");
        assert_eq!(extract_file_stem(""), "output");
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("a very long column name", 10), "a very ...");
    }
}
