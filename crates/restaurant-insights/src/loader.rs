//! CSV ingestion.
//!
//! Every column is read as text (schema inference off) so that values like
//! `"1,200"` reach the cleaner unchanged. After reading, the frame is
//! narrowed to the eight mapped columns.

use crate::config::ColumnMapping;
use crate::error::{InsightsError, Result, ResultExt};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// Load the restaurant table from `path` and keep only the mapped columns.
pub fn load_restaurants(path: &Path, columns: &ColumnMapping) -> Result<DataFrame> {
    if !path.exists() {
        return Err(InsightsError::InputNotFound(path.to_path_buf()));
    }

    info!("Loading dataset from: {}", path.display());
    let df = read_csv_as_text(path)?;
    debug!("Raw dataset shape: {:?}", df.shape());

    let df = select_required(&df, columns)?;
    if df.height() == 0 {
        return Err(InsightsError::EmptyDataset);
    }

    info!("Dataset loaded: {} rows", df.height());
    Ok(df)
}

/// Check that every mapped column is present in `df`.
pub fn require_columns(df: &DataFrame, columns: &ColumnMapping) -> Result<()> {
    let present = df.get_column_names();
    for name in columns.required() {
        if !present.iter().any(|col| col.as_str() == name) {
            return Err(InsightsError::ColumnNotFound(name.to_string()));
        }
    }
    Ok(())
}

/// Project `df` onto the mapped columns, in mapping order.
pub fn select_required(df: &DataFrame, columns: &ColumnMapping) -> Result<DataFrame> {
    require_columns(df, columns)?;
    let extra = df.width().saturating_sub(columns.required().len());
    if extra > 0 {
        debug!("Ignoring {} unused columns", extra);
    }
    df.select(columns.required())
        .context("Selecting restaurant columns")
}

fn read_csv_as_text(path: &Path) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .context(format!("Reading {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn write_temp_csv(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    const HEADER: &str =
        "url,name,online_order,book_table,votes,location,rest_type,cuisines,approx_cost(for two people)";

    #[test]
    fn test_load_reads_all_columns_as_text() {
        let content = format!(
            "{HEADER}\nu1,Jalsa,Yes,Yes,775,Banashankari,Casual Dining,\"North Indian, Chinese\",800\n\
             u2,Spice Elephant,Yes,No,787,Banashankari,Casual Dining,Chinese,\"1,200\"\n"
        );
        let path = write_temp_csv("restaurant_insights_loader_text.csv", &content);

        let df = load_restaurants(&path, &ColumnMapping::default()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(df.shape(), (2, 8));
        assert!(df.column("url").is_err());
        assert_eq!(df.column("votes").unwrap().dtype(), &DataType::String);
        let cost = df
            .column("approx_cost(for two people)")
            .unwrap()
            .as_materialized_series()
            .str()
            .unwrap()
            .get(1)
            .map(str::to_string);
        assert_eq!(cost.as_deref(), Some("1,200"));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_restaurants(
            Path::new("/nonexistent/restaurants.csv"),
            &ColumnMapping::default(),
        );
        assert!(matches!(result, Err(InsightsError::InputNotFound(_))));
    }

    #[test]
    fn test_load_missing_column() {
        let content = "name,location\nJalsa,Banashankari\n";
        let path = write_temp_csv("restaurant_insights_loader_missing.csv", content);

        let result = load_restaurants(&path, &ColumnMapping::default());
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(InsightsError::ColumnNotFound(ref c)) if c == "cuisines"));
    }

    #[test]
    fn test_load_rejects_row_with_extra_fields() {
        let content = "name,location,cuisines,approx_cost(for two people),votes,online_order,rest_type,book_table\n\
                       A,BTM,Cafe,300,1,Yes,Cafe,No\n\
                       B,HSR,Cafe,400,2,Yes,Cafe,No,EXTRA,FIELDS\n";
        let path = write_temp_csv("restaurant_insights_loader_ragged.csv", content);

        let result = load_restaurants(&path, &ColumnMapping::default());
        std::fs::remove_file(&path).ok();

        let error = result.unwrap_err();
        assert_eq!(error.error_code(), "POLARS_ERROR");
        assert!(error.to_string().contains("Reading"));
    }

    #[test]
    fn test_load_header_only() {
        let path = write_temp_csv(
            "restaurant_insights_loader_empty.csv",
            &format!("{HEADER}\n"),
        );

        let result = load_restaurants(&path, &ColumnMapping::default());
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(InsightsError::EmptyDataset)));
    }

    #[test]
    fn test_select_required_orders_columns() {
        let df = df![
            "votes" => ["1"],
            "extra" => ["x"],
            "name" => ["A"],
            "location" => ["L"],
            "cuisines" => ["C"],
            "approx_cost(for two people)" => ["300"],
            "online_order" => ["Yes"],
            "rest_type" => ["Cafe"],
            "book_table" => ["No"],
        ]
        .unwrap();

        let selected = select_required(&df, &ColumnMapping::default()).unwrap();
        let names: Vec<String> = selected
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names[0], "name");
        assert_eq!(names[4], "votes");
        assert_eq!(selected.width(), 8);
    }
}
