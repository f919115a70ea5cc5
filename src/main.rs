use clap::{Parser, Subcommand};
use forecast_ingest::{
    ingest, init_store, render_summary, render_table, FeedClient, FeedConfig, ForecastError,
    ForecastFilter, ForecastStore, StoreError, DEFAULT_STORE_PATH,
};
use log::{error, info};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about = "Ingest weather forecasts into a local SQLite store", long_about = None)]
struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = "FORECAST_DB", default_value = DEFAULT_STORE_PATH)]
    db: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the feed once and append the extracted forecasts
    Fetch {
        /// Feed URL (defaults to CWA_API_URL, then the CWA agricultural forecast)
        #[arg(long)]
        url: Option<String>,
        /// Request timeout in seconds (defaults to CWA_TIMEOUT_SECS, then 30)
        #[arg(long)]
        timeout: Option<u64>,
    },
    /// Create the database schema without fetching
    Init,
    /// Print stored forecasts
    Show {
        /// Only these locations (repeatable)
        #[arg(long = "location")]
        locations: Vec<String>,
        /// Earliest date, inclusive
        #[arg(long)]
        from: Option<String>,
        /// Latest date, inclusive
        #[arg(long)]
        to: Option<String>,
        /// Text to look for in the description (ASCII letters match in any case)
        #[arg(long)]
        keyword: Option<String>,
        /// Maximum number of rows
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            let mut source = err.source();
            while let Some(cause) = source {
                error!("  caused by: {}", cause);
                source = cause.source();
            }
            ExitCode::from(err.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<(), ForecastError> {
    match cli.command {
        Commands::Fetch { url, timeout } => {
            let mut config = FeedConfig::from_env();
            if let Some(url) = url {
                config.feed_url = url;
            }
            if let Some(secs) = timeout {
                config.timeout = Duration::from_secs(secs);
            }
            let client = FeedClient::new(config)?;
            let report = ingest(&client, &cli.db).await?;
            let feed_url = &client.config().feed_url;
            match report.strategy {
                Some(strategy) => println!(
                    "Stored {} forecasts from {} in {} (strategy: {})",
                    report.inserted,
                    feed_url,
                    cli.db.display(),
                    strategy
                ),
                None => println!("Feed {} contained no recognisable forecasts", feed_url),
            }
        }
        Commands::Init => {
            init_store(&cli.db).await?;
        }
        Commands::Show {
            locations,
            from,
            to,
            keyword,
            limit,
        } => {
            let filter = ForecastFilter::builder()
                .locations(locations)
                .maybe_date_from(from)
                .maybe_date_to(to)
                .maybe_keyword(keyword)
                .maybe_limit(limit)
                .build();
            let db = cli.db.clone();
            let output = tokio::task::spawn_blocking(move || {
                let store = ForecastStore::open(&db)?;
                let rows = store.query(&filter)?;
                let summary = store.summary(&filter)?;
                info!("Loaded {} rows from {}", rows.len(), db.display());
                Ok::<String, StoreError>(format!(
                    "{}\n{}",
                    render_table(&rows),
                    render_summary(&summary)
                ))
            })
            .await??;
            println!("{output}");
        }
    }
    Ok(())
}
