use crate::error::Result;
use crate::types::{CleaningSummary, InsightResult, InsightSet};
use chrono::Local;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Everything a consumer needs to render the dashboard.
///
/// Use this for both JSON output (`--json`) and file writing (`--emit-report`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Path to the input file
    pub input_file: String,
    /// Rows in the cleaned table
    pub rows: usize,
    /// Columns in the cleaned table
    pub columns: usize,
    /// What cleaning changed
    pub cleaning: CleaningSummary,
    /// Total execution time in milliseconds
    pub duration_ms: u64,
    /// Steps executed, in order
    pub processing_steps: Vec<String>,
    /// The seven result sets
    pub insights: InsightSet,
}

/// Builds reports and writes pipeline output files.
pub struct ReportGenerator {
    output_dir: PathBuf,
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./outputs"),
        }
    }
}

impl ReportGenerator {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    /// Assemble a report from a pipeline result and the cleaned table.
    pub fn build_report(
        input_file: &str,
        cleaned: &DataFrame,
        result: &InsightResult,
    ) -> InsightReport {
        InsightReport {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: input_file.to_string(),
            rows: cleaned.height(),
            columns: cleaned.width(),
            cleaning: result.cleaning.clone(),
            duration_ms: result.duration_ms,
            processing_steps: result.processing_steps.clone(),
            insights: result.insights.clone(),
        }
    }

    /// Write `report` as pretty JSON to `<output_dir>/<base_name>_insights.json`.
    pub fn write_report_to_file(&self, report: &InsightReport, base_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let report_path = self.output_dir.join(format!("{}_insights.json", base_name));
        let mut file = File::create(&report_path)?;
        file.write_all(serde_json::to_string_pretty(report)?.as_bytes())?;

        info!("Report saved: {}", report_path.display());

        Ok(report_path)
    }

    /// Write the cleaned table to `<output_dir>/<base_name>_cleaned.csv`.
    ///
    /// Missing costs and votes are written as empty fields.
    pub fn write_cleaned_csv(&self, cleaned: &mut DataFrame, base_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let output_path = self.output_dir.join(format!("{}_cleaned.csv", base_name));
        let mut file = File::create(&output_path)?;

        CsvWriter::new(&mut file)
            .include_header(true)
            .with_separator(b',')
            .with_quote_char(b'"')
            .finish(cleaned)?;

        info!("Cleaned dataset saved: {}", output_path.display());

        Ok(output_path)
    }
}
