//! API request types
//!
//! One JSON object per line, discriminated by `op`.

use serde::Deserialize;

use super::errors::{ApiError, ApiResult};
use crate::schema::{AnswerMap, FieldMap, FormId};
use crate::submission::SubmissionId;

/// Operations understood by the JSON-lines API
pub const OPERATIONS: &[&str] = &[
    "create_form",
    "get_form",
    "update_form",
    "submit",
    "get_submission",
    "list_submissions",
    "list_submission_ids",
];

/// Parsed request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    CreateForm {
        name: String,
        fields: FieldMap,
    },
    GetForm {
        form_id: FormId,
    },
    UpdateForm {
        form_id: FormId,
        name: String,
        fields: FieldMap,
    },
    Submit {
        form_id: FormId,
        answers: AnswerMap,
    },
    GetSubmission {
        submission_id: SubmissionId,
    },
    ListSubmissions {
        form_id: FormId,
    },
    ListSubmissionIds {
        form_id: FormId,
    },
}

/// Only the discriminator, for telling an unknown op from a malformed body
#[derive(Deserialize)]
struct OpTag {
    #[serde(default)]
    op: Option<String>,
}

impl Request {
    /// Parse a request from one JSON line
    pub fn parse(json: &str) -> ApiResult<Self> {
        let tag: OpTag = serde_json::from_str(json)
            .map_err(|e| ApiError::invalid_request(format!("Invalid JSON: {}", e)))?;

        let op = tag
            .op
            .ok_or_else(|| ApiError::invalid_request("Missing op"))?;
        if !OPERATIONS.contains(&op.as_str()) {
            return Err(ApiError::unknown_operation(op));
        }

        serde_json::from_str(json)
            .map_err(|e| ApiError::invalid_request(format!("Invalid {} request: {}", op, e)))
    }
}
