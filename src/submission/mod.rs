//! Submissions: materialization and read-back
//!
//! Control flow for a new submission:
//! `SchemaRegistry::get` → `SubmissionValidator::validate` →
//! `FormStore::create_submission`.

mod materializer;
mod query;
mod types;

pub use materializer::SubmissionMaterializer;
pub use query::QueryService;
pub use types::{AnswerPair, Submission, SubmissionId};
