//! Sectorlens CLI binary.
//!
//! Fetches sector-ETF price history, computes performance metrics, and
//! writes the text report and chart images.

mod integration;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use integration::data_pipeline::{SectorPrices, fetch_sector_prices};
use sectorlens::{Sector, SectorUniverse};
use sectorlens_data::yahoo::YahooQuoteProvider;
use sectorlens_data::{DataError, snapshot};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration as StdDuration;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "sectorlens")]
#[command(about = "Sectorlens: sector-ETF performance analysis", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch sector data, compute metrics, write report and charts
    Analyze {
        /// Lookback window in calendar days, ending yesterday
        #[arg(long, default_value = "365", conflicts_with_all = ["start", "end"])]
        days: i64,

        /// Explicit start date (YYYY-MM-DD)
        #[arg(long, requires = "end")]
        start: Option<NaiveDate>,

        /// Explicit end date (YYYY-MM-DD)
        #[arg(long, requires = "start")]
        end: Option<NaiveDate>,

        /// Annualized risk-free rate (0.03 = 3%)
        #[arg(long, default_value = "0.03")]
        risk_free_rate: f64,

        /// Directory for the report and figures
        #[arg(long, default_value = "output")]
        output_dir: PathBuf,

        /// Directory for the raw price snapshot
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Skip writing the raw price snapshot
        #[arg(long)]
        no_snapshot: bool,
    },

    /// List the sectors and their proxy ETFs
    Sectors,
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        error!(error = %e, "analysis run failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting tracing subscriber");
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            days,
            start,
            end,
            risk_free_rate,
            output_dir,
            data_dir,
            no_snapshot,
        } => {
            let window = resolve_window(days, start, end)?;
            analyze(
                window,
                risk_free_rate,
                &output_dir,
                &data_dir,
                no_snapshot,
            )
            .await
        }
        Commands::Sectors => {
            list_sectors();
            Ok(())
        }
    }
}

/// Output locations for a run.
struct OutputPaths {
    data_dir: PathBuf,
    reports_dir: PathBuf,
    figures_dir: PathBuf,
}

impl OutputPaths {
    fn new(output_dir: &Path, data_dir: &Path) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
            reports_dir: output_dir.join("reports"),
            figures_dir: output_dir.join("figures"),
        }
    }

    fn ensure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(&self.reports_dir)?;
        std::fs::create_dir_all(&self.figures_dir)?;
        Ok(())
    }
}

/// Turn CLI arguments into a UTC fetch window.
///
/// Defaults to the `days` preceding yesterday; explicit start/end dates
/// take precedence.
fn resolve_window(
    days: i64,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(DateTime<Utc>, DateTime<Utc>), DataError> {
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err(DataError::InvalidDateRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        return Ok((
            start.and_time(NaiveTime::MIN).and_utc(),
            end.and_time(NaiveTime::MIN).and_utc(),
        ));
    }

    let end = Utc::now() - Duration::days(1);
    let start = end - Duration::days(days);
    Ok((start, end))
}

async fn analyze(
    window: (DateTime<Utc>, DateTime<Utc>),
    risk_free_rate: f64,
    output_dir: &Path,
    data_dir: &Path,
    no_snapshot: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (start, end) = window;
    info!(
        start = %start.date_naive(),
        end = %end.date_naive(),
        risk_free_rate,
        "starting sector analysis"
    );

    let paths = OutputPaths::new(output_dir, data_dir);
    paths.ensure()?;

    let universe = SectorUniverse::new();
    let provider = YahooQuoteProvider::new();

    let pb = ProgressBar::new(universe.size() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("valid template")
            .progress_chars("█▓░"),
    );
    pb.enable_steady_tick(StdDuration::from_millis(100));
    pb.set_message("Fetching sector data...");

    let SectorPrices { prices, sectors } =
        match fetch_sector_prices(&provider, &universe, start, end, Some(&pb)).await {
            Ok(result) => {
                pb.finish_with_message(format!(
                    "Fetched {} of {} sectors ({} rows)",
                    result.sectors.len(),
                    universe.size(),
                    result.prices.height()
                ));
                result
            }
            Err(e) => {
                pb.finish_with_message("Failed!");
                return Err(e.into());
            }
        };

    if !no_snapshot {
        let snapshot_path = paths.data_dir.join("raw_market_data.csv");
        match snapshot::write_price_table(&prices, &snapshot_path) {
            Ok(()) => info!(path = %snapshot_path.display(), "raw price snapshot saved"),
            Err(e) => warn!(error = %e, "could not save raw price snapshot"),
        }
    }

    let bundle = sectorlens_metrics::compute(&prices, risk_free_rate)?;
    for skip in &bundle.degenerate {
        warn!(
            sector = %skip.sector,
            reason = %skip.reason,
            "sector excluded from risk-adjusted metrics"
        );
    }

    let report_path = paths.reports_dir.join("analysis_report.txt");
    sectorlens_output::write_report(&bundle, &sectors, &report_path)?;
    info!(path = %report_path.display(), "analysis report written");

    sectorlens_output::render_all(&bundle, &paths.figures_dir)?;
    info!(dir = %paths.figures_dir.display(), "charts rendered");

    println!(
        "Analyzed {} sectors from {} to {}.",
        sectors.len(),
        start.date_naive(),
        end.date_naive()
    );
    println!("Report:  {}", report_path.display());
    println!("Figures: {}", paths.figures_dir.display());

    Ok(())
}

fn list_sectors() {
    println!("GICS Sectors and proxy ETFs:");
    println!("============================\n");

    for sector in Sector::all() {
        println!("{:<28} {}", sector.name(), sector.etf_symbol());
    }
}
