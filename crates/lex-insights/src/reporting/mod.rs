//! Report generation module.
//!
//! Use [`AnalysisReport`] to bundle every result for a dataset:
//! - JSON output to stdout (`--json` CLI flag)
//! - JSON file output (`--emit-report` CLI flag)
//! - Programmatic access in library mode
//!
//! # Example
//!
//! ```rust,ignore
//! use lex_insights::reporting::ReportGenerator;
//!
//! let report = ReportGenerator::build_report(&dataset, analysis, insights, recommendations);
//!
//! // Print as JSON
//! println!("{}", serde_json::to_string_pretty(&report)?);
//!
//! // Or write to file
//! let generator = ReportGenerator::new(PathBuf::from("output"));
//! generator.write_report_to_file(&report, "sales")?;
//! ```

mod generator;

pub use generator::{AnalysisReport, ReportGenerator, SourceInfo};
