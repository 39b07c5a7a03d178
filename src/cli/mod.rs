//! CLI module for people-api
//!
//! Provides command-line interface for:
//! - serve: Boot the HTTP server
//! - validate: One-shot validation of a JSON object against a shape
//! - shapes: List the built-in shapes

mod args;
mod commands;
mod errors;
mod io;
mod logging;

pub use args::{Cli, Command};
pub use commands::{run, run_command, serve, shapes, validate, validation_envelope, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{parse_document, read_document, write_json};
pub use logging::{init_logging, LogFormat, LoggingConfig};
