//! Materialized submission records
//!
//! A submission stores frozen copies of the prompts it was answered
//! against. Nothing in it refers back to the live field definitions.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::schema::FormId;

/// Identifier of a submission
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(String);

impl SubmissionId {
    /// Generate a fresh random submission id
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubmissionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A (prompt, answer) pair frozen at submission time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerPair {
    pub prompt: String,
    pub answer: String,
}

impl AnswerPair {
    pub fn new(prompt: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            answer: answer.into(),
        }
    }
}

/// A persisted submission. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub id: SubmissionId,
    pub form_id: FormId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub answers: Vec<AnswerPair>,
}

impl Submission {
    /// Create a new submission with a fresh id and timestamps
    pub fn new(form_id: FormId, answers: Vec<AnswerPair>) -> Self {
        let now = Utc::now();
        Self {
            id: SubmissionId::generate(),
            form_id,
            created_at: now,
            updated_at: now,
            answers,
        }
    }
}
