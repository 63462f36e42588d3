//! Report generation module.
//!
//! [`InsightReport`] bundles the seven result sets with the cleaning
//! summary. It is what the CLI prints with `--json` and writes with
//! `--emit-report`.
//!
//! # Example
//!
//! ```rust,ignore
//! use restaurant_insights::reporting::ReportGenerator;
//!
//! let report = ReportGenerator::build_report("zomato.csv", &cleaned, &result);
//! println!("{}", serde_json::to_string_pretty(&report)?);
//!
//! let generator = ReportGenerator::new(PathBuf::from("outputs"));
//! generator.write_report_to_file(&report, "zomato")?;
//! ```

mod generator;

pub use generator::{InsightReport, ReportGenerator};
