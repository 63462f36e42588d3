//! Configuration types for the insights pipeline.
//!
//! This module provides configuration options using the builder pattern
//! for flexible and ergonomic pipeline setup. Configurations can also be
//! read from a JSON file; any field left out takes its default.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Header names of the eight columns the pipeline reads.
///
/// Defaults match the public restaurant listing export, where the cost
/// column is called `approx_cost(for two people)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub name: String,
    pub location: String,
    pub cuisines: String,
    pub cost: String,
    pub votes: String,
    pub online_order: String,
    pub rest_type: String,
    pub book_table: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            name: "name".to_string(),
            location: "location".to_string(),
            cuisines: "cuisines".to_string(),
            cost: "approx_cost(for two people)".to_string(),
            votes: "votes".to_string(),
            online_order: "online_order".to_string(),
            rest_type: "rest_type".to_string(),
            book_table: "book_table".to_string(),
        }
    }
}

impl ColumnMapping {
    /// All column names in input order.
    pub fn required(&self) -> [&str; 8] {
        [
            self.name.as_str(),
            self.location.as_str(),
            self.cuisines.as_str(),
            self.cost.as_str(),
            self.votes.as_str(),
            self.online_order.as_str(),
            self.rest_type.as_str(),
            self.book_table.as_str(),
        ]
    }

    fn fields(&self) -> [(&'static str, &str); 8] {
        [
            ("name", self.name.as_str()),
            ("location", self.location.as_str()),
            ("cuisines", self.cuisines.as_str()),
            ("cost", self.cost.as_str()),
            ("votes", self.votes.as_str()),
            ("online_order", self.online_order.as_str()),
            ("rest_type", self.rest_type.as_str()),
            ("book_table", self.book_table.as_str()),
        ]
    }
}

/// Configuration for the insights pipeline.
///
/// Use [`InsightsConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use restaurant_insights::config::InsightsConfig;
///
/// let config = InsightsConfig::builder()
///     .input_path("data/zomato.csv")
///     .top_rest_types(3)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightsConfig {
    /// Path of the CSV dataset.
    /// Default: "zomato.csv"
    pub input_path: PathBuf,

    /// Header names of the columns to read.
    pub columns: ColumnMapping,

    /// Cost text that marks a missing value (compared case-sensitively
    /// after separators and whitespace are stripped).
    /// Default: "nan"
    pub cost_missing_token: String,

    /// Number of locations in the frequency ranking.
    /// Default: 10
    pub top_locations: usize,

    /// Number of cuisines in the frequency ranking.
    /// Default: 10
    pub top_cuisines: usize,

    /// Number of locations in the average cost ranking.
    /// Default: 10
    pub top_cost_locations: usize,

    /// Number of restaurant names in the votes ranking.
    /// Default: 10
    pub top_voted: usize,

    /// Number of restaurant types in the frequency ranking.
    /// Default: 5
    pub top_rest_types: usize,

    /// Directory for the JSON report and the cleaned CSV.
    /// Default: "./outputs"
    pub output_dir: PathBuf,
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("zomato.csv"),
            columns: ColumnMapping::default(),
            cost_missing_token: "nan".to_string(),
            top_locations: 10,
            top_cuisines: 10,
            top_cost_locations: 10,
            top_voted: 10,
            top_rest_types: 5,
            output_dir: PathBuf::from("./outputs"),
        }
    }
}

impl InsightsConfig {
    /// Create a new configuration builder.
    pub fn builder() -> InsightsConfigBuilder {
        InsightsConfigBuilder::default()
    }

    /// Read a configuration from a JSON file and validate it.
    pub fn from_json_file(path: impl AsRef<Path>) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: InsightsConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let limits = [
            ("top_locations", self.top_locations),
            ("top_cuisines", self.top_cuisines),
            ("top_cost_locations", self.top_cost_locations),
            ("top_voted", self.top_voted),
            ("top_rest_types", self.top_rest_types),
        ];
        for (field, value) in limits {
            if value == 0 {
                return Err(ConfigValidationError::InvalidLimit {
                    field: field.to_string(),
                    value,
                });
            }
        }

        for (field, name) in self.columns.fields() {
            if name.trim().is_empty() {
                return Err(ConfigValidationError::EmptyColumnName(field.to_string()));
            }
        }

        if self.cost_missing_token.is_empty() {
            return Err(ConfigValidationError::EmptyMissingToken);
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid limit for '{field}': {value} (must be at least 1)")]
    InvalidLimit { field: String, value: usize },

    #[error("Column name for '{0}' must not be empty")]
    EmptyColumnName(String),

    #[error("Missing cost token must not be empty")]
    EmptyMissingToken,
}

/// Builder for [`InsightsConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct InsightsConfigBuilder {
    base: Option<InsightsConfig>,
    input_path: Option<PathBuf>,
    columns: Option<ColumnMapping>,
    cost_missing_token: Option<String>,
    top_locations: Option<usize>,
    top_cuisines: Option<usize>,
    top_cost_locations: Option<usize>,
    top_voted: Option<usize>,
    top_rest_types: Option<usize>,
    output_dir: Option<PathBuf>,
}

impl InsightsConfigBuilder {
    /// Start from an existing configuration instead of the defaults.
    ///
    /// Values set on the builder still override the base.
    pub fn from_config(config: InsightsConfig) -> Self {
        Self {
            base: Some(config),
            ..Self::default()
        }
    }

    /// Set the path of the CSV dataset.
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    /// Set the header names of the input columns.
    pub fn columns(mut self, columns: ColumnMapping) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Set the text treated as a missing cost.
    pub fn cost_missing_token(mut self, token: impl Into<String>) -> Self {
        self.cost_missing_token = Some(token.into());
        self
    }

    pub fn top_locations(mut self, n: usize) -> Self {
        self.top_locations = Some(n);
        self
    }

    pub fn top_cuisines(mut self, n: usize) -> Self {
        self.top_cuisines = Some(n);
        self
    }

    pub fn top_cost_locations(mut self, n: usize) -> Self {
        self.top_cost_locations = Some(n);
        self
    }

    pub fn top_voted(mut self, n: usize) -> Self {
        self.top_voted = Some(n);
        self
    }

    pub fn top_rest_types(mut self, n: usize) -> Self {
        self.top_rest_types = Some(n);
        self
    }

    /// Set the output directory for reports and the cleaned table.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `InsightsConfig` or an error if validation fails.
    pub fn build(self) -> Result<InsightsConfig, ConfigValidationError> {
        let base = self.base.unwrap_or_default();
        let config = InsightsConfig {
            input_path: self.input_path.unwrap_or(base.input_path),
            columns: self.columns.unwrap_or(base.columns),
            cost_missing_token: self.cost_missing_token.unwrap_or(base.cost_missing_token),
            top_locations: self.top_locations.unwrap_or(base.top_locations),
            top_cuisines: self.top_cuisines.unwrap_or(base.top_cuisines),
            top_cost_locations: self.top_cost_locations.unwrap_or(base.top_cost_locations),
            top_voted: self.top_voted.unwrap_or(base.top_voted),
            top_rest_types: self.top_rest_types.unwrap_or(base.top_rest_types),
            output_dir: self.output_dir.unwrap_or(base.output_dir),
        };

        config.validate()?;
        Ok(config)
    }
}
