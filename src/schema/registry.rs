//! Schema registry
//!
//! Create, read and wholesale-replace form schemas through the injected
//! [`FormStore`]. The registry holds no state of its own.

use std::sync::Arc;

use super::errors::SchemaError;
use super::types::{FieldMap, FormId, FormSchema};
use crate::core::FormsResult;
use crate::storage::FormStore;
use crate::submission::SubmissionId;

/// Registry of form schemas
#[derive(Clone)]
pub struct SchemaRegistry {
    store: Arc<dyn FormStore>,
}

impl SchemaRegistry {
    pub fn new(store: Arc<dyn FormStore>) -> Self {
        Self { store }
    }

    /// Stores a new schema. An empty field map is accepted.
    ///
    /// # Errors
    ///
    /// `AERO_INVALID_FORM_DEFINITION` if any field has an empty prompt.
    pub fn create(&self, name: &str, fields: FieldMap) -> FormsResult<FormSchema> {
        Self::check_structure(&fields)?;
        Ok(self.store.create_form(name, fields)?)
    }

    /// Returns the current schema of a form.
    ///
    /// # Errors
    ///
    /// `AERO_FORM_NOT_FOUND` if no form has this id.
    pub fn get(&self, form_id: &FormId) -> FormsResult<FormSchema> {
        self.store
            .get_form(form_id)?
            .ok_or_else(|| SchemaError::form_not_found(form_id).into())
    }

    /// Replaces name and fields of an existing form.
    pub fn update(&self, form_id: &FormId, name: &str, fields: FieldMap) -> FormsResult<FormSchema> {
        Self::check_structure(&fields)?;
        self.store
            .update_form(form_id, name, fields)?
            .ok_or_else(|| SchemaError::form_not_found(form_id).into())
    }

    /// Ids of the form's submissions, without loading their bodies.
    pub fn list_submission_ids(&self, form_id: &FormId) -> FormsResult<Vec<SubmissionId>> {
        Ok(self.store.list_submission_ids_by_form(form_id)?)
    }

    fn check_structure(fields: &FieldMap) -> Result<(), SchemaError> {
        FormSchema::validate_structure(fields)
            .map_err(|(field_id, reason)| SchemaError::invalid_definition(field_id, reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ErrorKind;
    use crate::schema::FieldDefinition;
    use crate::storage::InMemoryFormStore;

    fn registry() -> SchemaRegistry {
        SchemaRegistry::new(Arc::new(InMemoryFormStore::new()))
    }

    fn fields() -> FieldMap {
        let mut fields = FieldMap::new();
        fields.insert("f1".into(), FieldDefinition::required("text", "Name?"));
        fields
    }

    #[test]
    fn test_create_then_get() {
        let registry = registry();
        let form = registry.create("T", fields()).unwrap();
        assert_eq!(registry.get(&form.id).unwrap(), form);
    }

    #[test]
    fn test_create_accepts_empty_fields() {
        let form = registry().create("Empty", FieldMap::new()).unwrap();
        assert!(form.fields.is_empty());
    }

    #[test]
    fn test_create_rejects_empty_prompt() {
        let mut fields = fields();
        fields.insert("f2".into(), FieldDefinition::optional("text", ""));

        let err = registry().create("T", fields).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidForm);
        assert_eq!(err.code(), "AERO_INVALID_FORM_DEFINITION");
        assert!(err.message().contains("f2"));
    }

    #[test]
    fn test_get_unknown_form() {
        let err = registry().get(&FormId::new("missing")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_update_replaces_wholesale() {
        let registry = registry();
        let form = registry.create("T", fields()).unwrap();

        let mut replacement = FieldMap::new();
        replacement.insert("g1".into(), FieldDefinition::optional("email", "Email?"));
        let updated = registry.update(&form.id, "T2", replacement).unwrap();

        assert_eq!(updated.id, form.id);
        assert_eq!(updated.name, "T2");
        assert!(!updated.fields.contains_key("f1"));
        assert!(updated.fields.contains_key("g1"));
        assert_eq!(updated.created_at, form.created_at);
    }

    #[test]
    fn test_update_unknown_form() {
        let err = registry()
            .update(&FormId::new("missing"), "X", FieldMap::new())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_list_submission_ids_empty() {
        let registry = registry();
        let form = registry.create("T", fields()).unwrap();
        assert!(registry.list_submission_ids(&form.id).unwrap().is_empty());
    }
}
