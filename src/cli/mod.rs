//! CLI module for aeroforms
//!
//! Provides command-line interface for:
//! - init: Create directory structure
//! - start: Boot and serve JSON lines on stdin/stdout
//! - serve: Boot and serve HTTP
//! - validate: Dry-run one answer map against a form

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{init, run, run_command, serve, start, validate, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_answers, write_error, write_json, write_response};
