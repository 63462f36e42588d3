//! CLI entry point for the restaurant insights pipeline.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use dotenv::dotenv;
use restaurant_insights::{
    ChartKind, FrequencyEntry, InsightKind, InsightReport, InsightsConfig, InsightsConfigBuilder,
    Pipeline, ReportGenerator, share_percentages,
};
use std::path::Path;
use tracing::{error, info};

/// Environment variable consulted when `--input` is not given.
const DATA_PATH_ENV: &str = "RESTAURANT_DATA_PATH";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Restaurant dataset cleaning and aggregation",
    long_about = "Loads a restaurant listing CSV, normalizes cost and votes, and derives\n\
                  location, cuisine, cost, votes and service breakdowns.\n\n\
                  ENVIRONMENT VARIABLES:\n  \
                  RESTAURANT_DATA_PATH  CSV path used when --input is not given\n\n\
                  EXAMPLES:\n  \
                  # Human-readable summary\n  \
                  restaurant-insights -i zomato.csv\n\n  \
                  # Machine-readable output\n  \
                  restaurant-insights -i zomato.csv --json | jq .insights.top_voted\n\n  \
                  # Save the report and the cleaned table\n  \
                  restaurant-insights -i zomato.csv -r --export-cleaned -o results/"
)]
struct Args {
    /// Path to the CSV file to analyze
    #[arg(short, long)]
    input: Option<String>,

    /// JSON configuration file (missing fields take defaults)
    #[arg(short, long)]
    config: Option<String>,

    /// Output directory for written files
    #[arg(short, long)]
    output: Option<String>,

    /// Cost text treated as missing (case-sensitive)
    #[arg(long)]
    cost_missing_token: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings and errors)
    #[arg(short, long)]
    quiet: bool,

    /// Output JSON to stdout instead of human-readable summary
    ///
    /// Disables all logs; only the report is written to stdout.
    #[arg(long)]
    json: bool,

    /// Write a JSON report to the output directory
    ///
    /// The report will be saved as <input_name>_insights.json
    #[arg(short = 'r', long)]
    emit_report: bool,

    /// Write the cleaned table to the output directory
    ///
    /// The table will be saved as <input_name>_cleaned.csv
    #[arg(long)]
    export_cleaned: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load .env before logging so RUST_LOG from the file applies
    dotenv().ok();

    init_logging(&args.log_level, args.quiet, args.json);

    let config = build_config(&args, std::env::var(DATA_PATH_ENV).ok())?;
    let input = config.input_path.clone();
    if !input.exists() {
        return Err(anyhow!("Input file not found: {}", input.display()));
    }

    let pipeline = Pipeline::builder().config(config).build()?;

    let (mut cleaned, result) = match pipeline.process_file(&input) {
        Ok(output) => output,
        Err(e) if e.is_schema_error() => {
            error!("Pipeline failed: {}", e);
            return Err(anyhow!(
                "Dataset does not match the column mapping: {} (set \"columns\" in --config)",
                e
            ));
        }
        Err(e) => {
            error!("Pipeline failed: {}", e);
            return Err(anyhow!("Pipeline failed: {}", e));
        }
    };

    let input_display = input.display().to_string();
    let report = ReportGenerator::build_report(&input_display, &cleaned, &result);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let input_stem = extract_file_stem(&input);
    let generator = ReportGenerator::new(pipeline.config().output_dir.clone());

    if args.emit_report {
        let path = generator.write_report_to_file(&report, &input_stem)?;
        info!("Report written to: {}", path.display());
    }

    if args.export_cleaned {
        let path = generator.write_cleaned_csv(&mut cleaned, &input_stem)?;
        info!("Cleaned table written to: {}", path.display());
    }

    print_human_readable_summary(&report);

    Ok(())
}

/// Merge the config file, environment and CLI flags into one configuration.
///
/// Precedence for the input path: `--input`, then `env_input` (the value of
/// `RESTAURANT_DATA_PATH`), then the config file, then the built-in default.
fn build_config(args: &Args, env_input: Option<String>) -> Result<InsightsConfig> {
    let base = match &args.config {
        Some(path) => InsightsConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config file {}", path))?,
        None => InsightsConfig::default(),
    };

    let mut builder = InsightsConfigBuilder::from_config(base);

    if let Some(input) = args.input.clone().or(env_input) {
        builder = builder.input_path(input);
    }

    if let Some(ref output) = args.output {
        builder = builder.output_dir(output);
    }

    if let Some(ref token) = args.cost_missing_token {
        builder = builder.cost_missing_token(token);
    }

    Ok(builder.build()?)
}

/// Extract the file stem (name without extension) from a path.
fn extract_file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string()
}

/// Print a human-readable summary of the result sets.
///
/// Uses `println!` intentionally: this is the primary output, not logging.
fn print_human_readable_summary(report: &InsightReport) {
    let insights = &report.insights;
    let cleaning = &report.cleaning;

    println!();
    println!("{}", "=".repeat(80));
    println!("RESTAURANT INSIGHTS");
    println!("{}", "=".repeat(80));
    println!();
    println!(
        "Input: {} ({} rows x {} columns)",
        report.input_file, report.rows, report.columns
    );
    println!(
        "Cost for two: {} numeric, {} missing ({:.1}% coverage)",
        cleaning.costs_parsed,
        cleaning.costs_missing,
        cleaning.cost_coverage() * 100.0
    );
    if cleaning.votes_missing > 0 {
        println!("Votes: {} missing, counted as zero", cleaning.votes_missing);
    }
    println!("Duration: {}ms", report.duration_ms);

    for kind in InsightKind::ALL {
        print_section_header(kind);
        match kind {
            InsightKind::TopLocations => print_frequencies(kind, &insights.top_locations),
            InsightKind::PopularCuisines => print_frequencies(kind, &insights.top_cuisines),
            InsightKind::AverageCostByLocation => {
                for row in &insights.avg_cost_by_location {
                    println!("  {:<40} {:>10.1}", truncate_str(&row.group, 39), row.mean);
                }
            }
            InsightKind::MostVoted => {
                for row in &insights.top_voted {
                    println!("  {:<40} {:>10}", truncate_str(&row.group, 39), row.total);
                }
            }
            InsightKind::OnlineOrder => print_frequencies(kind, &insights.online_order),
            InsightKind::RestaurantTypes => print_frequencies(kind, &insights.rest_types),
            InsightKind::TableBooking => print_frequencies(kind, &insights.book_table),
        }
    }

    println!();
    println!("Use --json for machine-readable output");
    println!("Use --emit-report to save a JSON report");
    println!("{}", "=".repeat(80));
}

fn print_section_header(kind: InsightKind) {
    println!();
    println!("{}", kind.display_name().to_uppercase());
    println!("{}", "-".repeat(40));
}

fn print_frequencies(kind: InsightKind, entries: &[FrequencyEntry]) {
    if entries.is_empty() {
        println!("  (no values)");
        return;
    }

    match kind.chart() {
        ChartKind::Pie => {
            let shares = share_percentages(entries);
            for (entry, share) in entries.iter().zip(shares) {
                println!(
                    "  {:<40} {:>10} {:>6.1}%",
                    truncate_str(&entry.value, 39),
                    entry.count,
                    share
                );
            }
        }
        ChartKind::Bar => {
            for entry in entries {
                println!(
                    "  {:<40} {:>10}",
                    truncate_str(&entry.value, 39),
                    entry.count
                );
            }
        }
    }
}

/// Truncate a string to max characters with ellipsis
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
