//! Core Error Types
//!
//! Every public form operation returns [`FormsError`]. Subsystem errors are
//! passed through with their codes intact.

use thiserror::Error;

use crate::schema::{SchemaError, SchemaErrorCode};
use crate::storage::StorageError;
use crate::submission::SubmissionId;

/// Core module result type
pub type FormsResult<T> = Result<T, FormsError>;

/// Caller-facing error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Referenced form or submission does not exist
    NotFound,
    /// A required field is missing or empty
    Validation,
    /// An answer references a field the form does not define
    UnresolvedField,
    /// A form definition is malformed
    InvalidForm,
    /// The storage collaborator failed
    StorageFailure,
}

/// Core error type
#[derive(Debug, Error)]
pub enum FormsError {
    #[error("{0}")]
    Schema(#[from] SchemaError),

    #[error("Submission '{0}' not found")]
    SubmissionNotFound(SubmissionId),

    #[error("Storage failure: {0}")]
    Storage(#[from] StorageError),
}

impl FormsError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Schema(e) => match e.code() {
                SchemaErrorCode::AeroFormNotFound => ErrorKind::NotFound,
                SchemaErrorCode::AeroRequiredFieldMissing => ErrorKind::Validation,
                SchemaErrorCode::AeroUnresolvedField => ErrorKind::UnresolvedField,
                SchemaErrorCode::AeroInvalidFormDefinition => ErrorKind::InvalidForm,
            },
            Self::SubmissionNotFound(_) => ErrorKind::NotFound,
            Self::Storage(_) => ErrorKind::StorageFailure,
        }
    }

    /// Stable error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::Schema(e) => e.code().code(),
            Self::SubmissionNotFound(_) => "AERO_SUBMISSION_NOT_FOUND",
            Self::Storage(e) => e.code().code(),
        }
    }

    /// Caller-visible message.
    ///
    /// Storage details stay in the logs; callers get a generic failure.
    pub fn message(&self) -> String {
        match self {
            Self::Schema(e) => e.message().to_string(),
            Self::SubmissionNotFound(_) => self.to_string(),
            Self::Storage(_) => "Storage failure".to_string(),
        }
    }

    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::NotFound => 404,
            ErrorKind::Validation => 400,
            ErrorKind::UnresolvedField => 400,
            ErrorKind::InvalidForm => 400,
            ErrorKind::StorageFailure => 500,
        }
    }

    /// Whether the caller made the mistake
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}
