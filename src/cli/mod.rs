//! CLI module for the vehicle registry
//!
//! Provides command-line interface for:
//! - serve: run the handler behind the HTTP adapter
//! - invoke: handle one request event from stdin

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{build_handler, invoke, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_event, read_event_from, write_response, write_response_to};

/// Parse arguments and run the selected command
pub async fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command).await
}
