//! CLI errors
//!
//! Every variant ends the process with a non-zero exit status. `main`
//! prints `<AERO_CLI_*>: <message>` on stderr.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::schema::FormId;
use crate::storage::StorageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    ConfigError,
    IoError,
    AlreadyInitialized,
    NotInitialized,
    BootFailed,
    Rejected,
}

impl CliErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConfigError => "AERO_CLI_CONFIG_ERROR",
            Self::IoError => "AERO_CLI_IO_ERROR",
            Self::AlreadyInitialized => "AERO_CLI_ALREADY_INITIALIZED",
            Self::NotInitialized => "AERO_CLI_NOT_INITIALIZED",
            Self::BootFailed => "AERO_CLI_BOOT_FAILED",
            Self::Rejected => "AERO_CLI_REJECTED",
        }
    }
}

impl fmt::Display for CliErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read config file {}: {source}", .path.display())]
    ConfigUnreadable { path: PathBuf, source: io::Error },

    #[error("config file {} is not valid JSON: {source}", .path.display())]
    ConfigMalformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    #[error("{} already holds a form store", .0.display())]
    AlreadyInitialized(PathBuf),

    #[error("no form store in {}; run `aeroforms init` first", .0.display())]
    NotInitialized(PathBuf),

    #[error("cannot create store directory {}: {source}", .path.display())]
    CreateDataDir { path: PathBuf, source: io::Error },

    #[error("cannot open the form store: {0}")]
    StoreOpen(#[source] StorageError),

    #[error("cannot start the async runtime: {0}")]
    Runtime(#[source] io::Error),

    #[error("HTTP server stopped: {0}")]
    Http(#[source] io::Error),

    #[error("no answers on stdin; expected a JSON object of field id to answer text")]
    EmptyAnswers,

    #[error("standard stream I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("form {form} rejected the answers: {message}")]
    Rejected { form: FormId, message: String },
}

impl CliError {
    pub fn code(&self) -> CliErrorCode {
        match self {
            Self::ConfigUnreadable { .. } | Self::ConfigMalformed { .. } | Self::ConfigInvalid(_) => {
                CliErrorCode::ConfigError
            }
            Self::AlreadyInitialized(_) => CliErrorCode::AlreadyInitialized,
            Self::NotInitialized(_) => CliErrorCode::NotInitialized,
            Self::StoreOpen(_) | Self::Runtime(_) | Self::Http(_) => CliErrorCode::BootFailed,
            Self::CreateDataDir { .. } | Self::EmptyAnswers | Self::Io(_) | Self::Json(_) => {
                CliErrorCode::IoError
            }
            Self::Rejected { .. } => CliErrorCode::Rejected,
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
