use std::path::PathBuf;

use anyhow::{Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::info;

use tripmind::{TripAggregator, TripMindConfig, TripRequest, logging};

/// Flight and hotel search with live prices, estimates and recommendations
#[derive(Parser, Debug)]
#[command(name = "tripmind", version, about)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true, env = "TRIPMIND_CONFIG")]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search flights and hotels for a round trip and print the outcome as JSON
    #[command(after_help = "EXAMPLES:\n  \
                      tripmind search --origin LHR --destination CDG \
                      --departure 2025-06-01 --return 2025-06-05 --budget 1500")]
    Search(SearchArgs),
}

#[derive(Parser, Debug)]
struct SearchArgs {
    /// Origin airport IATA code
    #[arg(long)]
    origin: String,

    /// Destination airport or city IATA code
    #[arg(long)]
    destination: String,

    /// Departure date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    departure: NaiveDate,

    /// Return date (YYYY-MM-DD), after the departure date
    #[arg(long = "return", value_parser = parse_date)]
    return_date: NaiveDate,

    /// Total budget in USD
    #[arg(long)]
    budget: f64,

    /// Number of adult travellers
    #[arg(long, default_value_t = 1)]
    passengers: u32,
}

fn parse_date(value: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

impl SearchArgs {
    fn into_request(self) -> Result<TripRequest> {
        if self.return_date <= self.departure {
            bail!("Return date must be after the departure date");
        }
        if !self.budget.is_finite() || self.budget <= 0.0 {
            bail!("Budget must be a positive amount");
        }

        let request = TripRequest::new(
            &self.origin,
            &self.destination,
            self.departure,
            self.return_date,
            self.budget,
            self.passengers,
        );

        for code in [&request.origin, &request.destination] {
            if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
                bail!("'{code}' is not a three-letter IATA code");
            }
        }

        Ok(request)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = TripMindConfig::load_from_path(cli.config)?;
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    logging::init(&config.logging);

    match cli.command {
        Command::Search(args) => {
            let request = args.into_request()?;

            let aggregator = TripAggregator::from_config(&config).map_err(|e| {
                let hint = e.user_message();
                anyhow::Error::new(e).context(hint)
            })?;
            aggregator.warm_up().await;

            info!(
                "Searching {} → {} for {} night(s)",
                request.origin,
                request.destination,
                request.nights()
            );

            let outcome = aggregator.search(&request).await;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
    }

    Ok(())
}
