//! Main insights pipeline.
//!
//! This module provides the core `Pipeline` struct and builder for
//! running clean-then-aggregate over a restaurant table.

use crate::aggregate::{grouped_mean_top, grouped_sum_top, top_frequencies};
use crate::cleaner::RecordCleaner;
use crate::config::InsightsConfig;
use crate::error::{Result, ResultExt};
use crate::loader::{load_restaurants, require_columns};
use crate::types::{CleaningSummary, InsightResult, InsightSet};
use polars::prelude::*;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info};

/// The insights pipeline.
///
/// Use [`Pipeline::builder()`] to create a new pipeline with custom configuration.
///
/// # Example
///
/// ```rust,ignore
/// use restaurant_insights::{InsightsConfig, Pipeline};
///
/// let (cleaned, result) = Pipeline::builder()
///     .config(InsightsConfig::builder().top_rest_types(3).build()?)
///     .build()?
///     .process_file("zomato.csv")?;
///
/// for entry in &result.insights.top_locations {
///     println!("{}: {}", entry.value, entry.count);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: InsightsConfig,
    cleaner: RecordCleaner,
}

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// The configuration this pipeline runs with.
    pub fn config(&self) -> &InsightsConfig {
        &self.config
    }

    /// Load `path` and run the pipeline on it.
    ///
    /// Returns the cleaned table alongside the result.
    pub fn process_file(&self, path: impl AsRef<Path>) -> Result<(DataFrame, InsightResult)> {
        let df = load_restaurants(path.as_ref(), &self.config.columns)?;
        self.run(df).inspect_err(|e| error!("Pipeline error: {}", e))
    }

    /// Run cleaning and all seven queries on an already loaded table.
    pub fn process(&self, df: DataFrame) -> Result<InsightResult> {
        self.run(df)
            .map(|(_, result)| result)
            .inspect_err(|e| error!("Pipeline error: {}", e))
    }

    /// Clean the cost and votes columns only.
    pub fn clean(&self, df: DataFrame) -> Result<(DataFrame, CleaningSummary)> {
        let (cleaned, summary, _) = self.clean_internal(df)?;
        Ok((cleaned, summary))
    }

    fn run(&self, df: DataFrame) -> Result<(DataFrame, InsightResult)> {
        let start_time = Instant::now();
        info!("Starting insights pipeline...");

        let (cleaned, cleaning, mut processing_steps) = self.clean_internal(df)?;
        let insights = self.derive(&cleaned)?;
        processing_steps.push("Derived 7 result sets".to_string());

        let duration_ms = start_time.elapsed().as_millis() as u64;
        info!("Pipeline finished in {}ms", duration_ms);

        let result = InsightResult {
            insights,
            cleaning,
            processing_steps,
            duration_ms,
        };
        Ok((cleaned, result))
    }

    fn clean_internal(&self, df: DataFrame) -> Result<(DataFrame, CleaningSummary, Vec<String>)> {
        require_columns(&df, &self.config.columns)?;

        info!("Step 1: Cleaning {} rows...", df.height());
        self.cleaner
            .clean(df, &self.config.columns)
            .context("Cleaning restaurant table")
    }

    /// Run the seven independent queries over the cleaned table.
    fn derive(&self, df: &DataFrame) -> Result<InsightSet> {
        let columns = &self.config.columns;
        let config = &self.config;

        info!("Step 2: Deriving result sets...");

        let insights = InsightSet {
            top_locations: top_frequencies(df, &columns.location, Some(config.top_locations))?,
            top_cuisines: top_frequencies(df, &columns.cuisines, Some(config.top_cuisines))?,
            avg_cost_by_location: grouped_mean_top(
                df,
                &columns.location,
                &columns.cost,
                config.top_cost_locations,
            )?,
            top_voted: grouped_sum_top(df, &columns.name, &columns.votes, config.top_voted)?,
            online_order: top_frequencies(df, &columns.online_order, None)?,
            rest_types: top_frequencies(df, &columns.rest_type, Some(config.top_rest_types))?,
            book_table: top_frequencies(df, &columns.book_table, None)?,
        };

        debug!(
            locations = insights.top_locations.len(),
            cuisines = insights.top_cuisines.len(),
            cost_locations = insights.avg_cost_by_location.len(),
            voted = insights.top_voted.len(),
            rest_types = insights.rest_types.len(),
            "Result sets derived"
        );

        Ok(insights)
    }
}

/// Builder for [`Pipeline`].
#[derive(Debug, Default)]
pub struct PipelineBuilder {
    config: Option<InsightsConfig>,
}

impl PipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: InsightsConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the pipeline, validating the configuration.
    pub fn build(self) -> Result<Pipeline> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        Ok(Pipeline {
            cleaner: RecordCleaner::new(config.cost_missing_token.clone()),
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColumnMapping;
    use crate::types::FrequencyEntry;

    fn sample_frame() -> DataFrame {
        df![
            "name" => ["Onesta", "Onesta", "Truffles", "Jalsa"],
            "location" => ["HSR", "BTM", "HSR", "BTM"],
            "cuisines" => ["Pizza", "Pizza", "Burger", "North Indian"],
            "approx_cost(for two people)" => [Some("600"), Some("nan"), Some("1,000"), None],
            "votes" => [Some("100"), Some("50"), Some("80"), None],
            "online_order" => ["Yes", "Yes", "No", "Yes"],
            "rest_type" => [Some("Casual Dining"), Some("Casual Dining"), None, Some("Cafe")],
            "book_table" => ["No", "No", "Yes", "No"],
        ]
        .unwrap()
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let config = InsightsConfig {
            top_voted: 0,
            ..InsightsConfig::default()
        };
        let result = Pipeline::builder().config(config).build();
        assert_eq!(result.unwrap_err().error_code(), "INVALID_CONFIG");
    }

    #[test]
    fn test_process_sample() {
        let pipeline = Pipeline::builder().build().unwrap();
        let result = pipeline.process(sample_frame()).unwrap();
        let insights = &result.insights;

        assert_eq!(
            insights.top_locations,
            vec![FrequencyEntry::new("HSR", 2), FrequencyEntry::new("BTM", 2)]
        );
        assert_eq!(insights.avg_cost_by_location.len(), 1);
        assert_eq!(insights.avg_cost_by_location[0].group, "HSR");
        assert_eq!(insights.avg_cost_by_location[0].mean, 800.0);
        assert_eq!(insights.top_voted[0].group, "Onesta");
        assert_eq!(insights.top_voted[0].total, 150);
        assert_eq!(insights.top_voted[2].total, 0);
        assert_eq!(insights.online_order[0], FrequencyEntry::new("Yes", 3));
        assert_eq!(
            insights.rest_types,
            vec![
                FrequencyEntry::new("Casual Dining", 2),
                FrequencyEntry::new("Cafe", 1)
            ]
        );
        assert_eq!(result.cleaning.costs_parsed, 2);
        assert_eq!(result.processing_steps.len(), 3);
    }

    #[test]
    fn test_process_mixed_cost_formats() {
        let df = df![
            "name" => ["A", "B", "C"],
            "location" => ["BTM", "BTM", "BTM"],
            "cuisines" => ["Cafe", "Cafe", "Cafe"],
            "approx_cost(for two people)" => ["1,200", " 800 ", "NaN"],
            "votes" => ["1", "2", "3"],
            "online_order" => ["Yes", "No", "Yes"],
            "rest_type" => ["Cafe", "Cafe", "Cafe"],
            "book_table" => ["No", "No", "No"],
        ]
        .unwrap();

        let result = Pipeline::builder().build().unwrap().process(df).unwrap();

        assert_eq!(result.cleaning.costs_parsed, 2);
        assert_eq!(result.insights.avg_cost_by_location[0].mean, 1000.0);
    }

    #[test]
    fn test_process_missing_column() {
        let df = sample_frame().drop("book_table").unwrap();
        let result = Pipeline::builder().build().unwrap().process(df);
        assert_eq!(result.unwrap_err().error_code(), "COLUMN_NOT_FOUND");
    }

    #[test]
    fn test_process_custom_columns() {
        let mut df = sample_frame();
        df.rename("approx_cost(for two people)", "cost".into()).unwrap();
        let config = InsightsConfig::builder()
            .columns(ColumnMapping {
                cost: "cost".to_string(),
                ..ColumnMapping::default()
            })
            .top_locations(1)
            .build()
            .unwrap();

        let result = Pipeline::builder()
            .config(config)
            .build()
            .unwrap()
            .process(df)
            .unwrap();

        assert_eq!(result.insights.top_locations.len(), 1);
        assert_eq!(result.insights.avg_cost_by_location[0].mean, 800.0);
    }

    #[test]
    fn test_clean_only() {
        let pipeline = Pipeline::builder().build().unwrap();
        let (cleaned, summary) = pipeline.clean(sample_frame()).unwrap();
        assert_eq!(summary.votes_missing, 1);
        assert_eq!(
            cleaned
                .column("approx_cost(for two people)")
                .unwrap()
                .dtype(),
            &DataType::Float64
        );
    }
}
