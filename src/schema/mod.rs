//! Dynamic form schemas
//!
//! A form's field set is data, not code. This module owns the shape
//! ([`FormSchema`]), its storage-facing registry and the validator that
//! checks raw answers against it.

mod errors;
mod registry;
mod types;
mod validator;

pub use errors::{SchemaError, SchemaErrorCode, SchemaResult, Severity};
pub use registry::SchemaRegistry;
pub use types::{AnswerMap, FieldDefinition, FieldId, FieldMap, FormId, FormSchema, OrderedMap};
pub use validator::SubmissionValidator;
