//! CLI argument definitions for zararz.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `run` | Start the Telegram bot (long polling) |
//! | `show` | Print one category report to stdout |
//!
//! # Examples
//!
//! ```bash
//! # Start the bot with API_TOKEN and API_URL from .env
//! zararz run
//!
//! # Print the current gold prices
//! zararz show gold
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use zararz_core::Category;

/// Gold, currency and crypto price bot
#[derive(Debug, Parser)]
#[command(name = "zararz", author, version, about = "Gold, currency and crypto price bot")]
pub struct Cli {
    /// Directory holding users.json.
    #[arg(long, global = true, env = "ZARARZ_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the Telegram bot until interrupted.
    Run(RunArgs),
    /// Print the report for one category.
    Show(ShowArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Long-poll timeout for getUpdates, in seconds.
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(0..=50))]
    pub poll_timeout: u64,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    #[arg(value_enum)]
    pub category: CategoryArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    Gold,
    Currency,
    #[value(alias = "cryptocurrency")]
    Crypto,
}

impl From<CategoryArg> for Category {
    fn from(value: CategoryArg) -> Self {
        match value {
            CategoryArg::Gold => Self::Gold,
            CategoryArg::Currency => Self::Currency,
            CategoryArg::Crypto => Self::Cryptocurrency,
        }
    }
}
