//! Command-line interface definitions.

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::adapter::CoinGeckoFeed;
use crate::config::Config;
use crate::core::PriceOracle;
use crate::error::Result;

/// PoWR price oracle - cached ETH/USD pricing and conversion.
#[derive(Parser, Debug)]
#[command(name = "powr-oracle")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the current USD price of the reference asset
    Price,

    /// Convert a USD amount into a quantity of the reference asset
    Convert {
        /// USD amount to convert
        usd: Decimal,
    },

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `powr-oracle check`
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate configuration file
    Config,
}

pub async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Price => {
            let config = Config::load(&cli.config)?;
            config.init_logging();
            let oracle = build_oracle(&config);
            println!("{}", oracle.price().await);
            Ok(())
        }
        Commands::Convert { usd } => {
            let config = Config::load(&cli.config)?;
            config.init_logging();
            let oracle = build_oracle(&config);
            println!("{}", oracle.convert(usd).await);
            Ok(())
        }
        Commands::Check(CheckCommand::Config) => {
            let config = Config::load(&cli.config)?;
            config.init_logging();
            info!(path = %cli.config.display(), "config valid");
            println!("Config OK: {}", cli.config.display());
            Ok(())
        }
    }
}

fn build_oracle(config: &Config) -> PriceOracle {
    let feed = Arc::new(CoinGeckoFeed::from_config(&config.feed));
    PriceOracle::from_config(feed, &config.cache)
}
