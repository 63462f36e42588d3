//! Top-N frequency ranking.

use super::{COUNT_COLUMN, ensure_column, key_values, rank_descending};
use crate::error::{Result, ResultExt};
use crate::types::FrequencyEntry;
use polars::prelude::*;

/// Count distinct values of `column` and return the `limit` most frequent.
///
/// Counts are descending; equal counts keep first-seen order. `None` returns
/// every distinct value. Null values are not counted.
pub fn top_frequencies(
    df: &DataFrame,
    column: &str,
    limit: Option<usize>,
) -> Result<Vec<FrequencyEntry>> {
    ensure_column(df, column)?;

    let grouped = df
        .clone()
        .lazy()
        .filter(col(column).is_not_null())
        .group_by_stable([col(column).cast(DataType::String)])
        .agg([len().alias(COUNT_COLUMN)]);

    let ranked = rank_descending(grouped, COUNT_COLUMN, limit)
        .collect()
        .context(format!("Counting values of '{}'", column))?;

    let values = key_values(&ranked, column)?;
    let counts = ranked.column(COUNT_COLUMN)?.cast(&DataType::UInt64)?;
    let counts = counts.as_materialized_series().u64()?;

    Ok(values
        .into_iter()
        .zip(counts.into_iter())
        .map(|(value, count)| FrequencyEntry::new(value, count.unwrap_or(0)))
        .collect())
}

/// Each entry's share of the listed counts, in percent.
///
/// The shares are relative to the entries given, not to the whole table,
/// which is what a pie chart of a truncated ranking shows.
pub fn share_percentages(entries: &[FrequencyEntry]) -> Vec<f64> {
    let total: u64 = entries.iter().map(|entry| entry.count).sum();
    if total == 0 {
        return vec![0.0; entries.len()];
    }
    entries
        .iter()
        .map(|entry| entry.count as f64 * 100.0 / total as f64)
        .collect()
}
