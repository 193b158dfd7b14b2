//! CLI argument definitions using clap
//!
//! Commands:
//! - aeroforms init --config <path>
//! - aeroforms start --config <path>
//! - aeroforms serve --config <path> [--port <port>]
//! - aeroforms validate --config <path> --form <id>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// aeroforms - A strict, self-describing form submission store
#[derive(Parser, Debug)]
#[command(name = "aeroforms")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize a new data directory
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./aeroforms.json")]
        config: PathBuf,
    },

    /// Serve the JSON-lines API on stdin/stdout
    Start {
        /// Path to configuration file
        #[arg(long, default_value = "./aeroforms.json")]
        config: PathBuf,
    },

    /// Serve the HTTP API
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./aeroforms.json")]
        config: PathBuf,

        /// Override the configured HTTP port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Check an answer map from stdin against a form without storing it
    Validate {
        /// Path to configuration file
        #[arg(long, default_value = "./aeroforms.json")]
        config: PathBuf,

        /// Form id to validate against
        #[arg(long)]
        form: String,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
