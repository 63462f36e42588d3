//! Data cleaning for the restaurant table.
//!
//! This module provides:
//! - Cost normalization (thousands separators, whitespace, missing token)
//! - Votes coercion to integers
//!
//! Only the cost and votes columns are rewritten. Key columns pass through
//! untouched.

mod converters;

pub use converters::{THOUSANDS_SEPARATOR, normalize_cost, parse_votes};

use crate::config::ColumnMapping;
use crate::error::{Result, ResultExt};
use crate::types::CleaningSummary;
use converters::{to_cost_series, to_votes_series};
use polars::prelude::*;
use tracing::{debug, info};

/// Cleaner for the numeric columns of a restaurant table.
#[derive(Debug, Clone)]
pub struct RecordCleaner {
    missing_token: String,
}

impl RecordCleaner {
    pub fn new(missing_token: impl Into<String>) -> Self {
        Self {
            missing_token: missing_token.into(),
        }
    }

    /// Clean the cost and votes columns of `df`.
    ///
    /// Returns the cleaned frame, counts of what changed, and one
    /// human-readable line per cleaning action.
    pub fn clean(
        &self,
        mut df: DataFrame,
        columns: &ColumnMapping,
    ) -> Result<(DataFrame, CleaningSummary, Vec<String>)> {
        let mut cleaning_actions = Vec::new();
        let mut summary = CleaningSummary {
            rows: df.height(),
            ..Default::default()
        };

        info!("Normalizing cost and votes columns...");

        // 1. Cost for two
        let raw_cost = df
            .column(&columns.cost)
            .context("Reading cost column")?
            .as_materialized_series();
        let raw_missing = raw_cost.null_count();
        let cost = to_cost_series(raw_cost, &self.missing_token)
            .context(format!("Normalizing '{}'", columns.cost))?;

        summary.costs_missing = cost.null_count();
        summary.costs_parsed = summary.rows - summary.costs_missing;
        let coerced = summary.costs_missing - raw_missing;

        df.replace(&columns.cost, cost)
            .context("Replacing cost column")?;
        cleaning_actions.push(format!(
            "Normalized '{}': {} numeric, {} missing ({} unparseable)",
            columns.cost, summary.costs_parsed, summary.costs_missing, coerced
        ));
        debug!(
            parsed = summary.costs_parsed,
            missing = summary.costs_missing,
            coerced,
            "Cost column normalized"
        );

        // 2. Votes
        let raw_votes = df
            .column(&columns.votes)
            .context("Reading votes column")?
            .as_materialized_series();
        let votes = to_votes_series(raw_votes)
            .context(format!("Coercing '{}'", columns.votes))?;

        summary.votes_missing = votes.null_count();
        summary.votes_parsed = summary.rows - summary.votes_missing;

        df.replace(&columns.votes, votes)
            .context("Replacing votes column")?;
        if summary.votes_missing > 0 {
            cleaning_actions.push(format!(
                "Coerced '{}' to integers; {} missing values count as zero",
                columns.votes, summary.votes_missing
            ));
        } else {
            cleaning_actions.push(format!("Coerced '{}' to integers", columns.votes));
        }
        debug!(
            parsed = summary.votes_parsed,
            missing = summary.votes_missing,
            "Votes column coerced"
        );

        Ok((df, summary, cleaning_actions))
    }
}

impl Default for RecordCleaner {
    fn default() -> Self {
        Self::new("nan")
    }
}
