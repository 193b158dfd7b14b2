//! Submission materializer
//!
//! Turns raw answers into a persisted, schema-independent record:
//! resolve schema, validate, then one atomic store write.

use std::sync::Arc;

use super::types::Submission;
use crate::core::FormsResult;
use crate::schema::{AnswerMap, FormId, SchemaRegistry, SubmissionValidator};
use crate::storage::FormStore;

/// Creates submissions
#[derive(Clone)]
pub struct SubmissionMaterializer {
    registry: SchemaRegistry,
    store: Arc<dyn FormStore>,
}

impl SubmissionMaterializer {
    pub fn new(registry: SchemaRegistry, store: Arc<dyn FormStore>) -> Self {
        Self { registry, store }
    }

    /// Validates `answers` against the form's current schema and persists
    /// the resulting pairs.
    ///
    /// Nothing is written unless validation succeeds.
    ///
    /// # Errors
    ///
    /// - `AERO_FORM_NOT_FOUND` if the form does not exist
    /// - `AERO_REQUIRED_FIELD_MISSING` / `AERO_UNRESOLVED_FIELD` from validation
    /// - storage errors from the write
    pub fn create(&self, form_id: &FormId, answers: &AnswerMap) -> FormsResult<Submission> {
        let schema = self.registry.get(form_id)?;
        let pairs = SubmissionValidator::new(&schema).validate(answers)?;
        Ok(self.store.create_submission(&schema.id, pairs)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ErrorKind;
    use crate::schema::{FieldDefinition, FieldMap};
    use crate::storage::InMemoryFormStore;
    use crate::submission::AnswerPair;

    fn setup() -> (SubmissionMaterializer, Arc<dyn FormStore>, FormId) {
        let store: Arc<dyn FormStore> = Arc::new(InMemoryFormStore::new());
        let registry = SchemaRegistry::new(Arc::clone(&store));

        let mut fields = FieldMap::new();
        fields.insert("f1".into(), FieldDefinition::required("text", "Name?"));
        fields.insert("f2".into(), FieldDefinition::optional("text", "Age?"));
        let form = registry.create("T", fields).unwrap();

        (SubmissionMaterializer::new(registry, Arc::clone(&store)), store, form.id)
    }

    fn answers(entries: &[(&str, &str)]) -> AnswerMap {
        entries
            .iter()
            .map(|(k, v)| ((*k).into(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_create_persists_pairs_in_payload_order() {
        let (materializer, store, form_id) = setup();

        let submission = materializer
            .create(&form_id, &answers(&[("f2", "41"), ("f1", "Jo")]))
            .unwrap();

        assert_eq!(
            submission.answers,
            vec![AnswerPair::new("Age?", "41"), AnswerPair::new("Name?", "Jo")]
        );
        assert_eq!(store.get_submission(&submission.id).unwrap().unwrap(), submission);
    }

    #[test]
    fn test_rejected_submission_writes_nothing() {
        let (materializer, store, form_id) = setup();

        let err = materializer.create(&form_id, &answers(&[])).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(store.list_submission_ids_by_form(&form_id).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_form() {
        let (materializer, _, _) = setup();
        let err = materializer
            .create(&FormId::new("nope"), &answers(&[("f1", "Jo")]))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_unknown_field_is_named() {
        let (materializer, store, form_id) = setup();

        let err = materializer
            .create(&form_id, &answers(&[("f1", "Jo"), ("f9", "?")]))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::UnresolvedField);
        assert!(err.message().contains("f9"));
        assert!(store.list_submissions_by_form(&form_id).unwrap().is_empty());
    }
}
