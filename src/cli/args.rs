//! CLI argument definitions using clap
//!
//! Commands:
//! - vehicle-registry serve --config <path>
//! - vehicle-registry invoke --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Vehicle registry - CRUD handler for a vehicle collection
#[derive(Parser, Debug)]
#[command(name = "vehicle-registry")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the handler over HTTP
    Serve {
        /// Path to configuration file (defaults apply if it does not exist)
        #[arg(long, default_value = "./vehicle-registry.json")]
        config: PathBuf,
    },

    /// Handle one request event read from stdin and exit
    Invoke {
        /// Path to configuration file (defaults apply if it does not exist)
        #[arg(long, default_value = "./vehicle-registry.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
