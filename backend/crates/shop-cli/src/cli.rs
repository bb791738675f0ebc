use crate::commands::Commands;

use shop_config::LogLevel;

use clap::Parser;

#[derive(Parser)]
#[command(name = "shop-admin")]
#[command(about = "Admin sign-in and profile management for the shop site")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Override the configured log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,
}
