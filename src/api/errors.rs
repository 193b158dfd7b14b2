//! API error types
//!
//! API errors are pass-through: core error codes reach the client
//! unchanged. Only malformed input gets an API-level code.

use std::fmt;

use crate::core::FormsError;

/// API-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    /// Request line is not valid JSON or lacks a required member
    AeroInvalidRequest,
    /// `op` names no known operation
    AeroUnknownOperation,
}

impl ApiErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            ApiErrorCode::AeroInvalidRequest => "AERO_INVALID_REQUEST",
            ApiErrorCode::AeroUnknownOperation => "AERO_UNKNOWN_OPERATION",
        }
    }
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// API error with the originating code preserved
#[derive(Debug, Clone)]
pub struct ApiError {
    code: String,
    message: String,
}

impl ApiError {
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self {
            code: ApiErrorCode::AeroInvalidRequest.code().to_string(),
            message: reason.into(),
        }
    }

    pub fn unknown_operation(op: impl Into<String>) -> Self {
        Self {
            code: ApiErrorCode::AeroUnknownOperation.code().to_string(),
            message: format!("Unknown operation: {}", op.into()),
        }
    }

    /// Pass a core error through with its code
    pub fn from_forms_error(err: &FormsError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.message(),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<FormsError> for ApiError {
    fn from(err: FormsError) -> Self {
        Self::from_forms_error(&err)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
