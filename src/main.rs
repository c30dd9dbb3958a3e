use analytics::{
    AnalyticsEngine, DateRange, FilteredView, ViewFilter, group_count, group_mean, group_sum, search,
};
use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use configuration::DashboardSettings;
use core_types::{Dimension, SalesTable, SearchField};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

mod logging;
mod render;

/// The main entry point for the SaleScope dashboard.
fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file, if there is one
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = configuration::load_config(cli.config.as_deref())
        .context("Failed to load configuration")?;
    let _log_guard = logging::init(&config.logging)?;

    // The table is acquired once; a failed load leaves nothing behind.
    let data_path = cli.data.clone().unwrap_or_else(|| config.dataset.path.clone());
    let table = dataset::load_path(&data_path)
        .with_context(|| format!("Failed to load sales data from '{}'", data_path.display()))?;

    let filter = build_filter(&cli, &config.dashboard, &table);
    let view = filter.apply(&table);

    // Execute the appropriate command
    match cli.command {
        Commands::Summary => {
            let engine = AnalyticsEngine::new().with_recent_window(config.dashboard.insights_window);
            let report = engine.report(&view);
            render::summary(&view, &report, config.dashboard.preview_rows);
        }
        Commands::Report => {
            let engine = AnalyticsEngine::new().with_recent_window(config.dashboard.insights_window);
            let report = engine.report(&view);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Breakdown(args) => match args.measure {
            Measure::Sum => render::totals(args.by, "Total Sales", &group_sum(&view, args.by)),
            Measure::Mean => render::totals(args.by, "Average Sale", &group_mean(&view, args.by)),
            Measure::Count => render::counts(args.by, &group_count(&view, args.by)),
        },
        Commands::Search(args) => {
            let result = search(&view, args.field, &args.value);
            render::search(args.field, &args.value, &result);
        }
        Commands::Export(args) => handle_export(args, &view)?,
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Explore a retail sales dataset: KPIs, breakdowns, trends and correlations.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file. Defaults to `salescope.toml` in the working directory, if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// The sales file to load. Overrides `dataset.path`.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// First day of the date range (format: YYYY-MM-DD).
    #[arg(long, global = true)]
    from: Option<NaiveDate>,

    /// Last day of the date range (format: YYYY-MM-DD).
    #[arg(long, global = true)]
    to: Option<NaiveDate>,

    /// Keep only these cities. Repeatable.
    #[arg(long = "city", global = true)]
    cities: Vec<String>,

    /// Keep only these product lines. Repeatable.
    #[arg(long = "product-line", global = true)]
    product_lines: Vec<String>,

    /// Keep only these genders. Repeatable.
    #[arg(long = "gender", global = true)]
    genders: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the dashboard as terminal tables.
    Summary,
    /// Print the dashboard as JSON.
    Report,
    /// Break sales down by one dimension.
    Breakdown(BreakdownArgs),
    /// Total sales for one city or product line.
    Search(SearchArgs),
    /// Write the filtered rows as CSV.
    Export(ExportArgs),
}

#[derive(Parser)]
struct BreakdownArgs {
    /// branch, city, customer-type, gender, product-line or payment.
    #[arg(long)]
    by: Dimension,

    #[arg(long, value_enum, default_value_t = Measure::Sum)]
    measure: Measure,
}

#[derive(Clone, Copy, ValueEnum)]
enum Measure {
    Sum,
    Mean,
    Count,
}

#[derive(Parser)]
struct SearchArgs {
    /// `city` or `product-line`.
    #[arg(long)]
    field: SearchField,

    /// The exact, case-sensitive value to look up (e.g., "Yangon").
    #[arg(long)]
    value: String,
}

#[derive(Parser)]
struct ExportArgs {
    /// Destination file. Writes to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

/// Combines command-line selections with configured defaults.
///
/// A missing bound falls back to the configured default, then to the dataset's own span.
fn build_filter(cli: &Cli, settings: &DashboardSettings, table: &SalesTable) -> ViewFilter {
    let bounds = table.date_bounds();
    let start = cli.from.or(settings.default_start).or(bounds.map(|(first, _)| first));
    let end = cli.to.or(settings.default_end).or(bounds.map(|(_, last)| last));

    let allow_list = |values: &[String]| (!values.is_empty()).then(|| values.to_vec());

    ViewFilter {
        date_range: start.zip(end).map(|(start, end)| DateRange::new(start, end)),
        cities: allow_list(&cli.cities),
        product_lines: allow_list(&cli.product_lines),
        genders: allow_list(&cli.genders),
    }
}

fn handle_export(args: ExportArgs, view: &FilteredView<'_>) -> anyhow::Result<()> {
    let written = match &args.out {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create '{}'", path.display()))?;
            let written = dataset::write_csv(view.rows(), BufWriter::new(file))?;
            tracing::info!(rows = written, path = %path.display(), "Filtered data exported.");
            written
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            let written = dataset::write_csv(view.rows(), &mut handle)?;
            handle.flush()?;
            written
        }
    };
    if written == 0 {
        tracing::warn!("The filtered view is empty; only the header was exported.");
    }
    Ok(())
}
