use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use dividend_screener::models::Config;
use dividend_screener::{DividendScreener, OutputMode, ScreeningCriteria, YahooClient, DEFAULT_TICKERS};

#[derive(Parser)]
#[command(name = "dividend-screener")]
#[command(about = "Screen dividend growth stocks with the chowder rule")]
struct Cli {
    /// Comma-separated tickers to screen instead of the built-in list
    #[arg(long, value_delimiter = ',')]
    tickers: Vec<String>,

    /// Print a metrics summary line for every ticker
    #[arg(long, conflicts_with = "json")]
    verbose: bool,

    /// Print each ticker's metrics as a JSON line
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout only carries screening output
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("dividend_screener=info")),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");

    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            eprintln!("❌ Configuration Error: {}", e);
            std::process::exit(1);
        }
    };
    info!("📋 Using provider at {}", config.yahoo_base_url);

    let client = YahooClient::new(&config)?;

    let output = if cli.json {
        OutputMode::Json
    } else if cli.verbose {
        OutputMode::Verbose
    } else {
        OutputMode::Plain
    };

    let tickers: Vec<String> = if cli.tickers.is_empty() {
        DEFAULT_TICKERS.iter().map(|t| t.to_string()).collect()
    } else {
        cli.tickers
    };

    let screener = DividendScreener::new(client, ScreeningCriteria::default()).with_output(output);
    screener.run(&tickers).await;

    Ok(())
}
