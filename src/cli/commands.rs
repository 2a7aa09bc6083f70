//! CLI command implementations
//!
//! Both commands load configuration, install logging, and obtain the
//! process-wide store handle before doing any work.

use std::path::Path;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::handler::RecordHandler;
use crate::http_server::HttpServer;
use crate::observability::init_logging;
use crate::store::shared_store;

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_event, write_response};

/// Run a parsed command
pub async fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve { config } => serve(&config).await,
        Command::Invoke { config } => invoke(&config).await,
    }
}

/// Build the handler described by `config`
pub async fn build_handler(config: &AppConfig) -> CliResult<RecordHandler> {
    let schema = config.collection.schema()?;
    let store = shared_store(&config.store, &schema).await;
    Ok(RecordHandler::new(schema, store))
}

fn boot(config_path: &Path) -> CliResult<AppConfig> {
    let config = AppConfig::load_or_default(config_path)?;
    init_logging(&config.logging)?;
    tracing::info!(
        config = %config_path.display(),
        table = %config.collection.table_name,
        backend = ?config.store.backend,
        "configuration loaded"
    );
    Ok(config)
}

/// Serve the handler over HTTP until the process exits
pub async fn serve(config_path: &Path) -> CliResult<()> {
    let config = boot(config_path)?;
    let handler = Arc::new(build_handler(&config).await?);

    HttpServer::new(config.server.clone(), handler)
        .start()
        .await
        .map_err(|e| CliError::serve_failed(e.to_string()))
}

/// Handle a single event from stdin and print the response
pub async fn invoke(config_path: &Path) -> CliResult<()> {
    let config = boot(config_path)?;
    let handler = build_handler(&config).await?;

    let event = read_event()?;
    let response = handler.handle(event).await;
    write_response(&response)
}
