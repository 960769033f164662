//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// clicktrail - URL shortener with per-visit analytics
#[derive(Parser, Debug)]
#[command(name = "clicktrail")]
#[command(version)]
#[command(about = "URL shortener with per-visit analytics", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(long, short = 'c', global = true, default_value = crate::config::DEFAULT_CONFIG_PATH)]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Print a sample configuration file, or write it to --output
    ConfigGen {
        /// Output file path
        #[arg(long, short = 'o')]
        output: Option<String>,
    },
}
