//! Submission validator
//!
//! Validation semantics:
//! - Required fields are checked in schema field order
//! - The first required field without a non-empty answer aborts validation
//! - Every answered field id must exist in the schema
//! - Resolved pairs follow the order of the answer payload, not the schema
//!
//! Answers are opaque text. No coercion, no length limits, no per-type rules.

use super::errors::{SchemaError, SchemaResult};
use super::types::{AnswerMap, FormSchema};
use crate::submission::AnswerPair;

/// Validates raw answers against one form schema.
///
/// Validator does not mutate the schema or the answers.
/// Validation is deterministic.
pub struct SubmissionValidator<'a> {
    schema: &'a FormSchema,
}

impl<'a> SubmissionValidator<'a> {
    /// Creates a validator bound to the given schema.
    pub fn new(schema: &'a FormSchema) -> Self {
        Self { schema }
    }

    /// Validates an answer map and resolves each answer to its prompt.
    ///
    /// # Errors
    ///
    /// - `AERO_REQUIRED_FIELD_MISSING` for the first required field (in
    ///   schema order) that is absent or empty
    /// - `AERO_UNRESOLVED_FIELD` for the first answer whose field id the
    ///   schema does not define
    pub fn validate(&self, answers: &AnswerMap) -> SchemaResult<Vec<AnswerPair>> {
        self.check_required(answers)?;
        self.resolve(answers)
    }

    /// Fail-fast required-field check.
    fn check_required(&self, answers: &AnswerMap) -> SchemaResult<()> {
        for (field_id, def) in self.schema.fields.iter() {
            if !def.required {
                continue;
            }
            let answered = answers
                .get(field_id)
                .map(|answer| !answer.is_empty())
                .unwrap_or(false);
            if !answered {
                return Err(SchemaError::missing_required(
                    &self.schema.id,
                    field_id,
                    &def.prompt,
                ));
            }
        }
        Ok(())
    }

    /// Resolves answers to (prompt, answer) pairs in payload order.
    fn resolve(&self, answers: &AnswerMap) -> SchemaResult<Vec<AnswerPair>> {
        let mut pairs = Vec::with_capacity(answers.len());
        for (field_id, answer) in answers.iter() {
            let def = self
                .schema
                .fields
                .get(field_id)
                .ok_or_else(|| SchemaError::unresolved_field(&self.schema.id, field_id))?;
            pairs.push(AnswerPair::new(def.prompt.clone(), answer.clone()));
        }
        Ok(pairs)
    }
}
