//! Per-group mean and sum rankings.

use super::{MEAN_COLUMN, TOTAL_COLUMN, ensure_column, key_values, rank_descending};
use crate::error::{Result, ResultExt};
use crate::types::{GroupMean, GroupTotal};
use polars::prelude::*;

/// Mean of `value` per `group`, highest first, truncated to `limit`.
///
/// Nulls in `value` are left out of both sum and count. Groups with no
/// non-null value have no mean and are dropped from the ranking.
pub fn grouped_mean_top(
    df: &DataFrame,
    group: &str,
    value: &str,
    limit: usize,
) -> Result<Vec<GroupMean>> {
    ensure_column(df, group)?;
    ensure_column(df, value)?;

    let grouped = df
        .clone()
        .lazy()
        .filter(col(group).is_not_null())
        .group_by_stable([col(group).cast(DataType::String)])
        .agg([col(value).cast(DataType::Float64).mean().alias(MEAN_COLUMN)])
        .filter(col(MEAN_COLUMN).is_not_null());

    let ranked = rank_descending(grouped, MEAN_COLUMN, Some(limit))
        .collect()
        .context(format!("Averaging '{}' by '{}'", value, group))?;

    let groups = key_values(&ranked, group)?;
    let means = ranked.column(MEAN_COLUMN)?.as_materialized_series().f64()?;

    Ok(groups
        .into_iter()
        .zip(means.into_iter())
        .filter_map(|(group, mean)| mean.map(|mean| GroupMean { group, mean }))
        .collect())
}

/// Sum of `value` per `group`, highest first, truncated to `limit`.
///
/// Nulls in `value` contribute zero.
pub fn grouped_sum_top(
    df: &DataFrame,
    group: &str,
    value: &str,
    limit: usize,
) -> Result<Vec<GroupTotal>> {
    ensure_column(df, group)?;
    ensure_column(df, value)?;

    let grouped = df
        .clone()
        .lazy()
        .filter(col(group).is_not_null())
        .group_by_stable([col(group).cast(DataType::String)])
        .agg([col(value)
            .cast(DataType::Int64)
            .fill_null(lit(0i64))
            .sum()
            .alias(TOTAL_COLUMN)]);

    let ranked = rank_descending(grouped, TOTAL_COLUMN, Some(limit))
        .collect()
        .context(format!("Summing '{}' by '{}'", value, group))?;

    let groups = key_values(&ranked, group)?;
    let totals = ranked.column(TOTAL_COLUMN)?.cast(&DataType::Int64)?;
    let totals = totals.as_materialized_series().i64()?;

    Ok(groups
        .into_iter()
        .zip(totals.into_iter())
        .map(|(group, total)| GroupTotal {
            group,
            total: total.unwrap_or(0),
        })
        .collect())
}
