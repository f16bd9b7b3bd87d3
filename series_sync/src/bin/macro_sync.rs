use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use fred_ingestor::providers::fred_rest::FredProvider;
use series_sync::config::SeriesCatalog;
use series_sync::service::{DataService, RefreshMode, RefreshOutcome};
use series_sync::store::MetadataStore;
use series_sync::store::csv::CsvSeriesStore;
use series_sync::store::metadata::JsonMetadataStore;
use series_sync::transform::prepare_chart_data;

#[derive(Parser)]
#[command(version, about = "Macro series sync CLI")]
struct Cli {
    /// Path to the series catalog (TOML)
    #[arg(short, long, default_value = "config/series.toml")]
    config: String,

    /// Directory holding per-series CSV files and metadata.json
    #[arg(long, default_value = "data")]
    data_dir: String,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Full,
    Incremental,
}

impl From<ModeArg> for RefreshMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Full => RefreshMode::Full,
            ModeArg::Incremental => RefreshMode::Incremental,
        }
    }
}

#[derive(Subcommand)]
enum Cmd {
    /// Fetch series data, from the local cache when present
    Fetch {
        /// Comma-separated series ids; defaults to all configured series
        #[arg(long, value_delimiter = ',')]
        series: Vec<String>,

        /// Start date (inclusive, YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// End date (inclusive, YYYY-MM-DD)
        #[arg(long)]
        end: Option<NaiveDate>,

        /// Display window: 6m, 1y, 3y, 5y, or all
        #[arg(long, default_value = "all")]
        range: String,

        /// Rescale each series so its first value is 100
        #[arg(long)]
        normalize: bool,
    },

    /// Refresh stored series from FRED
    Refresh {
        /// Comma-separated series ids; defaults to all configured series
        #[arg(long, value_delimiter = ',')]
        series: Vec<String>,

        #[arg(long, value_enum, default_value = "incremental")]
        mode: ModeArg,
    },

    /// Print stored metadata for all series
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let catalog = SeriesCatalog::load_path(&cli.config)
        .with_context(|| format!("loading series catalog from {}", cli.config))?;
    let series_store = CsvSeriesStore::new(&cli.data_dir)?;
    let metadata_store = JsonMetadataStore::new(format!("{}/metadata.json", cli.data_dir))?;

    match cli.cmd {
        Cmd::Fetch {
            series,
            start,
            end,
            range,
            normalize,
        } => {
            let adapter = FredProvider::from_env()?;
            let service = DataService::new(series_store, metadata_store, adapter, catalog);
            let ids = if series.is_empty() {
                service.configured_series_ids()
            } else {
                series
            };

            let data = service.get_series(&ids, start, end).await?;
            let prepared = prepare_chart_data(&data, &range, normalize);

            for (series_id, observations) in &prepared {
                match (observations.first(), observations.last()) {
                    (Some(first), Some(last)) => println!(
                        "{series_id}: {} points ({} .. {})",
                        observations.len(),
                        first.date,
                        last.date
                    ),
                    _ => println!("{series_id}: no data"),
                }
            }
        }

        Cmd::Refresh { series, mode } => {
            let adapter = FredProvider::from_env()?;
            let service = DataService::new(series_store, metadata_store, adapter, catalog);
            let ids = if series.is_empty() {
                service.configured_series_ids()
            } else {
                series
            };

            let report = service.refresh_data(&ids, mode.into()).await;
            for (series_id, outcome) in &report.outcomes {
                match outcome {
                    RefreshOutcome::Updated { rows } => println!("{series_id}: {rows} new rows"),
                    RefreshOutcome::Failed { reason } => eprintln!("ERROR: {series_id} - {reason}"),
                }
            }
            // Summary goes to stderr so stdout stays machine-parseable.
            eprintln!(
                "SUMMARY: {} succeeded, {} failed, {} rows fetched",
                report.succeeded(),
                report.failed(),
                report.rows_fetched()
            );
        }

        Cmd::Status => {
            let document = metadata_store.get_all()?;
            if document.is_empty() {
                println!("no series metadata recorded");
            }
            for (series_id, meta) in &document {
                let fmt = |d: Option<NaiveDate>| {
                    d.map_or_else(|| "-".to_string(), |d| d.to_string())
                };
                println!(
                    "{series_id}: {} records, {} .. {}, last updated {}",
                    meta.record_count,
                    fmt(meta.data_start_date),
                    fmt(meta.data_end_date),
                    fmt(meta.last_updated)
                );
            }
        }
    }

    Ok(())
}
