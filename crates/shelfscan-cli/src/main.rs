use std::io::Write as _;

use clap::Parser;

mod display;
mod run;

#[derive(Debug, Parser)]
#[command(name = "shelfscan")]
#[command(about = "Scrapes paginated product-search results into per-query CSV files")]
struct Cli {
    /// Search term; prompted for interactively when omitted.
    query: Option<String>,

    /// Number of result pages to fetch.
    #[arg(long)]
    pages: Option<u32>,

    /// Maximum concurrent page fetches.
    #[arg(long)]
    workers: Option<usize>,

    /// Attempts per page before giving up on it.
    #[arg(long)]
    retries: Option<u32>,

    /// Proxy location code, e.g. "us".
    #[arg(long)]
    location: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = shelfscan_core::load_app_config_from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    let query = match cli.query {
        Some(query) => query,
        None => prompt_query()?,
    };
    let pages = cli.pages.unwrap_or(config.pages);
    let workers = cli.workers.unwrap_or(config.max_workers);
    let retries = cli.retries.unwrap_or(config.max_retries);
    let location = cli.location.unwrap_or_else(|| config.location.clone());

    let client = shelfscan_scraper::SearchClient::new(
        &config.api_key,
        &location,
        config.request_timeout_secs,
        retries,
        config.retry_backoff_secs,
    )?;
    let store = shelfscan_store::CsvStore::new(&config.output_dir);

    // page failures are contained and logged inside the run; the display
    // step shows whatever was persisted regardless
    run::run_search(&client, &store, &query, pages, workers).await;

    display::display_products(&store, &query)?;
    Ok(())
}

fn prompt_query() -> anyhow::Result<String> {
    print!("Enter the name of the product you want to search for: ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
