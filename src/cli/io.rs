//! JSON I/O handling for CLI
//!
//! - Input: one request event as a JSON object on stdin
//! - Output: the response envelope as one JSON line on stdout

use std::io::{self, Read, Write};

use crate::handler::{ProxyResponse, RequestEvent};

use super::errors::{CliError, CliResult};

/// Parse a request event from `reader`
pub fn read_event_from<R: Read>(mut reader: R) -> CliResult<RequestEvent> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;

    if input.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }

    Ok(serde_json::from_str(&input)?)
}

/// Read a request event from stdin
pub fn read_event() -> CliResult<RequestEvent> {
    read_event_from(io::stdin().lock())
}

/// Write a response envelope to `writer`
pub fn write_response_to<W: Write>(mut writer: W, response: &ProxyResponse) -> CliResult<()> {
    serde_json::to_writer(&mut writer, response)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Write a response envelope to stdout
pub fn write_response(response: &ProxyResponse) -> CliResult<()> {
    write_response_to(io::stdout().lock(), response)
}
