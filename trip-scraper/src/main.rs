use std::process::ExitCode;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use trip_scraper::config::{FeedConfig, config_path};
use trip_scraper::fetch::PageClient;
use trip_scraper::runner::scrape_routes;
use trip_scraper::stops::load_directory;

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so stdout carries only the trip JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let path = config_path(std::env::args().nth(1))?;
    let config = FeedConfig::load(&path)?;
    info!(config = %path.display(), routes = config.routes.len(), "loaded config");

    let directory = load_directory(&config.stops_path)?;
    if directory.is_empty() {
        warn!("stop directory is empty; every trip will have no stop times");
    }

    let client = PageClient::new(&config.fetch)?;
    let report = scrape_routes(&client, &config, &directory).await?;

    info!(
        trips = report.trips.len(),
        empty = report.empty_trips().count(),
        routes = report.routes.len(),
        failed = report.failures.len(),
        "scrape finished"
    );

    let json = serde_json::to_string_pretty(&report.trips)?;
    println!("{json}");
    Ok(())
}
