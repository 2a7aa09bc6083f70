//! Vehicle registry entry point
//!
//! Parses CLI arguments, runs the command, prints errors to stderr and
//! exits non-zero on failure. All logic lives in the cli module.

use vehicle_registry::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
