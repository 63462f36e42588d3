//! Value conversions for the numeric columns.
//!
//! Cost and votes arrive as text. Conversion failures become nulls; nothing
//! in here returns an error for a bad value.

use polars::prelude::*;

/// Thousands separator stripped from cost values before parsing.
pub const THOUSANDS_SEPARATOR: char = ',';

/// Normalize one raw cost value.
///
/// Commas are removed first, then surrounding whitespace. The result is
/// missing (`None`) when it is empty, equals `missing_token` exactly, or does
/// not parse to a finite number. Sign is not checked.
///
/// # Example
///
/// ```rust,ignore
/// use restaurant_insights::cleaner::normalize_cost;
///
/// assert_eq!(normalize_cost("1,200", "nan"), Some(1200.0));
/// assert_eq!(normalize_cost(" 800 ", "nan"), Some(800.0));
/// assert_eq!(normalize_cost("nan", "nan"), None);
/// ```
pub fn normalize_cost(raw: &str, missing_token: &str) -> Option<f64> {
    let without_separators = raw.replace(THOUSANDS_SEPARATOR, "");
    let cleaned = without_separators.trim();

    if cleaned.is_empty() || cleaned == missing_token {
        return None;
    }

    // f64 parsing accepts "NaN" and "inf"; neither is a usable cost.
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Parse a votes value. Whole-valued floats such as `"12.0"` are accepted.
pub fn parse_votes(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(value) = trimmed.parse::<i64>() {
        return Some(value);
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value.fract() == 0.0 => Some(value as i64),
        _ => None,
    }
}

/// Convert a cost column of any dtype to `Float64` with nulls for missing.
pub(crate) fn to_cost_series(series: &Series, missing_token: &str) -> PolarsResult<Series> {
    let text = series.cast(&DataType::String)?;
    let values: Vec<Option<f64>> = text
        .str()?
        .into_iter()
        .map(|opt_val| opt_val.and_then(|raw| normalize_cost(raw, missing_token)))
        .collect();

    Ok(Series::new(series.name().clone(), values))
}

/// Convert a votes column to `Int64` with nulls for absent or malformed values.
pub(crate) fn to_votes_series(series: &Series) -> PolarsResult<Series> {
    if series.dtype().is_integer() {
        return series.cast(&DataType::Int64);
    }

    let text = series.cast(&DataType::String)?;
    let values: Vec<Option<i64>> = text
        .str()?
        .into_iter()
        .map(|opt_val| opt_val.and_then(parse_votes))
        .collect();

    Ok(Series::new(series.name().clone(), values))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_null_at(series: &Series, idx: usize) -> bool {
        matches!(series.get(idx).unwrap(), AnyValue::Null)
    }

    // ========================================================================
    // normalize_cost() tests
    // ========================================================================

    #[test]
    fn test_normalize_cost_separators_and_whitespace() {
        assert_eq!(normalize_cost("1,200", "nan"), Some(1200.0));
        assert_eq!(normalize_cost(" 800 ", "nan"), Some(800.0));
        assert_eq!(normalize_cost(" 1,50,000 ", "nan"), Some(150000.0));
        assert_eq!(normalize_cost("350.5", "nan"), Some(350.5));
    }

    #[test]
    fn test_normalize_cost_missing_values() {
        assert_eq!(normalize_cost("nan", "nan"), None);
        assert_eq!(normalize_cost("NaN", "nan"), None);
        assert_eq!(normalize_cost("", "nan"), None);
        assert_eq!(normalize_cost(",,,", "nan"), None);
        assert_eq!(normalize_cost("   ", "nan"), None);
        assert_eq!(normalize_cost("inf", "nan"), None);
    }

    #[test]
    fn test_normalize_cost_malformed_text() {
        assert_eq!(normalize_cost("about 400", "nan"), None);
        assert_eq!(normalize_cost("₹500", "nan"), None);
        assert_eq!(normalize_cost("4 00", "nan"), None);
    }

    #[test]
    fn test_normalize_cost_sign_unchanged() {
        assert_eq!(normalize_cost("-300", "nan"), Some(-300.0));
        assert_eq!(normalize_cost("0", "nan"), Some(0.0));
    }

    #[test]
    fn test_normalize_cost_custom_token_is_case_sensitive() {
        assert_eq!(normalize_cost("N/A", "N/A"), None);
        // "n/a" is not the token and does not parse either
        assert_eq!(normalize_cost("n/a", "N/A"), None);
        assert_eq!(normalize_cost("nan", "N/A"), None);
    }

    // ========================================================================
    // parse_votes() tests
    // ========================================================================

    #[test]
    fn test_parse_votes() {
        assert_eq!(parse_votes("775"), Some(775));
        assert_eq!(parse_votes(" 12 "), Some(12));
        assert_eq!(parse_votes("12.0"), Some(12));
        assert_eq!(parse_votes("12.5"), None);
        assert_eq!(parse_votes(""), None);
        assert_eq!(parse_votes("many"), None);
    }

    // ========================================================================
    // Series conversion tests
    // ========================================================================

    #[test]
    fn test_to_cost_series_from_strings() {
        let series = Series::new(
            "cost".into(),
            &[Some("1,200"), Some(" 800 "), Some("nan"), None],
        );
        let result = to_cost_series(&series, "nan").unwrap();

        assert_eq!(result.dtype(), &DataType::Float64);
        assert_eq!(result.name().as_str(), "cost");
        let values = result.f64().unwrap();
        assert_eq!(values.get(0), Some(1200.0));
        assert_eq!(values.get(1), Some(800.0));
        assert!(is_null_at(&result, 2));
        assert!(is_null_at(&result, 3));
        assert_eq!(result.mean(), Some(1000.0));
    }

    #[test]
    fn test_to_cost_series_from_numeric() {
        let series = Series::new("cost".into(), &[Some(300i64), None, Some(1500)]);
        let result = to_cost_series(&series, "nan").unwrap();

        let values = result.f64().unwrap();
        assert_eq!(values.get(0), Some(300.0));
        assert!(is_null_at(&result, 1));
        assert_eq!(values.get(2), Some(1500.0));
    }

    #[test]
    fn test_to_votes_series_from_strings() {
        let series = Series::new("votes".into(), &[Some("10"), Some("x"), None, Some("4.0")]);
        let result = to_votes_series(&series).unwrap();

        assert_eq!(result.dtype(), &DataType::Int64);
        let values = result.i64().unwrap();
        assert_eq!(values.get(0), Some(10));
        assert!(is_null_at(&result, 1));
        assert!(is_null_at(&result, 2));
        assert_eq!(values.get(3), Some(4));
    }

    #[test]
    fn test_to_votes_series_from_integers() {
        let series = Series::new("votes".into(), &[1i32, 2, 3]);
        let result = to_votes_series(&series).unwrap();
        assert_eq!(result.dtype(), &DataType::Int64);
        assert_eq!(result.i64().unwrap().get(2), Some(3));
    }
}
