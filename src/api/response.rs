//! API response types
//!
//! Payloads are serialized directly from the typed records so that field
//! and answer order survive onto the wire.

use serde::Serialize;

use super::errors::ApiError;
use crate::schema::FormSchema;
use crate::submission::{Submission, SubmissionId};

/// Success payload
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseData {
    Form(FormSchema),
    Submission(Submission),
    Submissions(Vec<Submission>),
    SubmissionIds(Vec<SubmissionId>),
}

/// Success response
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub status: &'static str,
    pub data: ResponseData,
}

impl SuccessResponse {
    pub fn new(data: ResponseData) -> Self {
        Self { status: "ok", data }
    }
}

/// Error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn from_error(err: &ApiError) -> Self {
        Self {
            status: "error",
            code: err.code().to_string(),
            message: err.message().to_string(),
        }
    }
}

/// Unified response type
#[derive(Debug, Clone)]
pub enum Response {
    Success(SuccessResponse),
    Error(ErrorResponse),
}

impl Response {
    pub fn success(data: ResponseData) -> Self {
        Response::Success(SuccessResponse::new(data))
    }

    pub fn error(err: &ApiError) -> Self {
        Response::Error(ErrorResponse::from_error(err))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success(_))
    }

    /// Render as one JSON line (without the trailing newline)
    pub fn to_json(&self) -> String {
        let rendered = match self {
            Response::Success(r) => serde_json::to_string(r),
            Response::Error(r) => serde_json::to_string(r),
        };
        rendered.unwrap_or_else(|e| {
            format!(
                r#"{{"status":"error","code":"AERO_INVALID_REQUEST","message":"Response encoding failed: {}"}}"#,
                e.to_string().replace('"', "'")
            )
        })
    }
}
