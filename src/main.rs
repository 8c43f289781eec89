use std::{
    fs::OpenOptions,
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Arc,
};

use clap::Parser;
use time::OffsetDateTime;
use tracing_subscriber::{EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use billz::{Config, Dashboard, Error, Snapshot, render_report, to_local, try_format_monetary};

/// Print a summary of balances, debts, coupons and discount cards exported
/// from the store.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to a JSON snapshot of the user's rows.
    #[arg(long, short)]
    snapshot: PathBuf,

    /// File path to a JSON config file with `currency` and `local_timezone`.
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// The year to show the monthly trend for. Defaults to the current year.
    #[arg(long, short)]
    year: Option<i32>,

    /// The ISO 4217 code to display amounts in, e.g. "EUR".
    #[arg(long, env = "BILLZ_CURRENCY")]
    currency: Option<String>,

    /// The local timezone as a canonical timezone name, e.g. "Europe/Lisbon".
    #[arg(long, env = "BILLZ_TIMEZONE")]
    timezone: Option<String>,

    /// File path to append debug logs to.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(error) = setup_logging(args.log_file.as_deref()) {
        eprintln!("Could not open log file: {error}");
        return ExitCode::FAILURE;
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Error> {
    let mut config = match &args.config {
        Some(path) => Config::from_path(path)?,
        None => Config::default(),
    };

    if let Some(currency) = args.currency {
        config.currency = currency;
    }

    if let Some(timezone) = args.timezone {
        config.local_timezone = timezone;
    }

    if let Err(error) = try_format_monetary(0.0, &config.currency) {
        tracing::warn!("amounts will be shown without currency formatting: {error}");
    }

    let now = OffsetDateTime::now_utc();
    let timezone = config.timezone()?;
    let year = args.year.unwrap_or_else(|| to_local(now, timezone).year());

    let snapshot = Snapshot::from_path(&args.snapshot)?;
    tracing::info!("Loaded snapshot from {}", args.snapshot.display());

    let dashboard = Dashboard::build(&snapshot, now, year, timezone);
    print!("{}", render_report(&dashboard, &config.currency));

    Ok(())
}

fn setup_logging(log_file: Option<&Path>) -> std::io::Result<()> {
    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    let debug_log = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;

            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Arc::new(file))
                    .with_filter(filter::LevelFilter::DEBUG),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stdout_log)
        .with(debug_log)
        .init();

    Ok(())
}
