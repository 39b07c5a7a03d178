//! CLI argument definitions using clap
//!
//! Commands:
//! - people-api serve [--config <path>] [--host <host>] [--port <port>]
//! - people-api validate --shape <name> [--input <path>] [--exclude a,b]
//! - people-api shapes

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// people-api - a small people API with shape-driven request validation
#[derive(Parser, Debug)]
#[command(name = "people-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Host to bind to (overrides the configuration file)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides the configuration file)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Validate one JSON object against a shape and print the result
    Validate {
        /// Shape name (see `shapes`)
        #[arg(long)]
        shape: String,

        /// JSON input file; stdin when omitted
        #[arg(long)]
        input: Option<PathBuf>,

        /// Fields to drop from the printed record
        #[arg(long, value_delimiter = ',')]
        exclude: Vec<String>,

        /// Path to configuration file (logging settings only)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List the built-in shapes and their fields
    Shapes,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
