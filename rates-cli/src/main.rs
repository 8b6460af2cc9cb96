//! Rates CLI
//!
//! Command-line interface for the Exchange Rates API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use rates_client::RatesClient;

#[derive(Parser)]
#[command(name = "rates")]
#[command(author, version, about = "Exchange Rates API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Exchange Rates API
    #[arg(long, env = "RATES_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported currencies with metadata
    List,
    /// Show rates relative to a base currency
    Convert {
        /// Base currency code, e.g. EUR
        base: String,
        /// Only these currencies (comma-separated)
        #[arg(long, value_delimiter = ',')]
        currencies: Vec<String>,
        /// Include country, symbol and flag for every currency
        #[arg(long)]
        detailed: bool,
    },
    /// Check API health
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = RatesClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::List => {
            let listing = client.list_currencies().await?;
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }

        Commands::Convert {
            base,
            currencies,
            detailed,
        } => {
            let codes: Vec<&str> = currencies
                .iter()
                .map(|c| c.trim())
                .filter(|c| !c.is_empty())
                .collect();
            let response = if detailed {
                client.rates_detailed(&base, &codes).await?
            } else {
                client.rates(&base, &codes).await?
            };
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_convert() {
        let cli = Cli::try_parse_from([
            "rates",
            "--api-url",
            "http://rates.local",
            "convert",
            "eur",
            "--currencies",
            "usd,jpy",
            "--detailed",
        ])
        .unwrap();

        assert_eq!(cli.api_url, "http://rates.local");
        match cli.command {
            Commands::Convert {
                base,
                currencies,
                detailed,
            } => {
                assert_eq!(base, "eur");
                assert_eq!(currencies, vec!["usd", "jpy"]);
                assert!(detailed);
            }
            _ => panic!("expected convert"),
        }
    }

    #[test]
    fn test_convert_requires_base() {
        assert!(Cli::try_parse_from(["rates", "convert"]).is_err());
    }
}
