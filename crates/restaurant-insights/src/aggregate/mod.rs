//! Grouping and ranking queries over the cleaned table.
//!
//! Every query groups with first-occurrence group order and sorts stably,
//! so ties keep the order in which their keys first appear in the input.
//! Rows whose key is null are left out of every query.

mod frequency;
mod grouped;

pub use frequency::{share_percentages, top_frequencies};
pub use grouped::{grouped_mean_top, grouped_sum_top};

use crate::error::{InsightsError, Result};
use polars::prelude::*;

pub(crate) const COUNT_COLUMN: &str = "count";
pub(crate) const MEAN_COLUMN: &str = "mean";
pub(crate) const TOTAL_COLUMN: &str = "total";

fn ensure_column(df: &DataFrame, name: &str) -> Result<()> {
    if df.get_column_names().iter().any(|col| col.as_str() == name) {
        Ok(())
    } else {
        Err(InsightsError::ColumnNotFound(name.to_string()))
    }
}

/// Descending, stable sort on one column.
fn rank_descending(lf: LazyFrame, by: &str, limit: Option<usize>) -> LazyFrame {
    let sorted = lf.sort(
        [by],
        SortMultipleOptions::default()
            .with_order_descending(true)
            .with_nulls_last(true)
            .with_maintain_order(true),
    );
    match limit {
        Some(n) => sorted.limit(IdxSize::try_from(n).unwrap_or(IdxSize::MAX)),
        None => sorted,
    }
}

/// Group keys of a ranked frame as owned strings.
fn key_values(ranked: &DataFrame, key: &str) -> Result<Vec<String>> {
    let keys = ranked.column(key)?.as_materialized_series().str()?;
    Ok(keys
        .into_iter()
        .map(|opt_val| opt_val.unwrap_or_default().to_string())
        .collect())
}
