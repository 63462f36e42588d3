//! Restaurant Insights Library
//!
//! Cleaning and aggregation over restaurant listing datasets, built with
//! Rust and Polars.
//!
//! # Overview
//!
//! The pipeline reads one CSV table, normalizes its cost and votes columns,
//! and derives seven ranked result sets:
//!
//! - **Top locations** and **popular cuisines** by row count
//! - **Average cost for two** per location, missing costs excluded
//! - **Most voted** restaurant names, missing votes counted as zero
//! - **Online order**, **restaurant type** and **table booking** breakdowns
//!
//! Rendering is left to the caller; every result type is `serde`
//! serializable.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use restaurant_insights::{InsightsConfig, Pipeline};
//!
//! let config = InsightsConfig::builder()
//!     .input_path("zomato.csv")
//!     .build()?;
//!
//! let pipeline = Pipeline::builder().config(config.clone()).build()?;
//! let (cleaned, result) = pipeline.process_file(&config.input_path)?;
//!
//! for row in &result.insights.avg_cost_by_location {
//!     println!("{:<20} {:>8.1}", row.group, row.mean);
//! }
//! ```
//!
//! # Cost normalization
//!
//! Costs like `"1,200"` or `" 800 "` become numbers. Empty text, the
//! configured missing token (default `nan`), and anything that does not
//! parse become nulls instead of errors. See [`cleaner::normalize_cost`].

pub mod aggregate;
pub mod cleaner;
pub mod config;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod reporting;
pub mod types;

// Re-exports for convenient access
pub use aggregate::{grouped_mean_top, grouped_sum_top, share_percentages, top_frequencies};
pub use cleaner::{RecordCleaner, normalize_cost, parse_votes};
pub use config::{ColumnMapping, ConfigValidationError, InsightsConfig, InsightsConfigBuilder};
pub use error::{InsightsError, Result as InsightsResult, ResultExt};
pub use loader::load_restaurants;
pub use pipeline::{Pipeline, PipelineBuilder};
pub use reporting::{InsightReport, ReportGenerator};
pub use types::{
    ChartKind, CleaningSummary, FrequencyEntry, GroupMean, GroupTotal, InsightKind, InsightResult,
    InsightSet,
};
