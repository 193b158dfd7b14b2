//! Storage collaborator interface and the in-memory backend

use std::collections::HashMap;
use std::sync::RwLock;

use super::errors::{StorageError, StorageResult};
use crate::schema::{FieldMap, FormId, FormSchema};
use crate::submission::{AnswerPair, Submission, SubmissionId};

/// Persistence contract consumed by the form core.
///
/// Implementations generate ids and timestamps. `create_submission` must
/// be atomic: the submission and all of its answer pairs become visible
/// together or not at all.
pub trait FormStore: Send + Sync {
    /// Read a form by id
    fn get_form(&self, id: &FormId) -> StorageResult<Option<FormSchema>>;

    /// Store a new form
    fn create_form(&self, name: &str, fields: FieldMap) -> StorageResult<FormSchema>;

    /// Replace name and fields of an existing form; `None` if absent
    fn update_form(
        &self,
        id: &FormId,
        name: &str,
        fields: FieldMap,
    ) -> StorageResult<Option<FormSchema>>;

    /// Persist a submission with its answer pairs as one unit
    fn create_submission(
        &self,
        form_id: &FormId,
        answers: Vec<AnswerPair>,
    ) -> StorageResult<Submission>;

    /// Read a submission by id
    fn get_submission(&self, id: &SubmissionId) -> StorageResult<Option<Submission>>;

    /// All submissions of a form, oldest first
    fn list_submissions_by_form(&self, form_id: &FormId) -> StorageResult<Vec<Submission>>;

    /// Ids of all submissions of a form, oldest first
    fn list_submission_ids_by_form(&self, form_id: &FormId) -> StorageResult<Vec<SubmissionId>>;
}

/// In-memory materialized view of forms and submissions.
///
/// Shared by both backends: the file backend rebuilds it from the log.
#[derive(Debug, Default)]
pub struct StoreIndex {
    forms: HashMap<FormId, FormSchema>,
    submissions: HashMap<SubmissionId, Submission>,
    by_form: HashMap<FormId, Vec<SubmissionId>>,
}

impl StoreIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a form (latest wins)
    pub fn put_form(&mut self, form: FormSchema) {
        self.forms.insert(form.id.clone(), form);
    }

    /// Insert a submission. Re-applying the same id is a no-op.
    pub fn put_submission(&mut self, submission: Submission) {
        if self.submissions.contains_key(&submission.id) {
            return;
        }
        self.by_form
            .entry(submission.form_id.clone())
            .or_default()
            .push(submission.id.clone());
        self.submissions.insert(submission.id.clone(), submission);
    }

    pub fn form(&self, id: &FormId) -> Option<&FormSchema> {
        self.forms.get(id)
    }

    pub fn submission(&self, id: &SubmissionId) -> Option<&Submission> {
        self.submissions.get(id)
    }

    pub fn submission_ids(&self, form_id: &FormId) -> Vec<SubmissionId> {
        self.by_form.get(form_id).cloned().unwrap_or_default()
    }

    pub fn submissions_for(&self, form_id: &FormId) -> Vec<Submission> {
        self.by_form
            .get(form_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.submissions.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn form_count(&self) -> usize {
        self.forms.len()
    }

    pub fn submission_count(&self) -> usize {
        self.submissions.len()
    }
}

/// Volatile backend for tests and the `memory` storage mode.
#[derive(Debug, Default)]
pub struct InMemoryFormStore {
    index: RwLock<StoreIndex>,
}

impl InMemoryFormStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FormStore for InMemoryFormStore {
    fn get_form(&self, id: &FormId) -> StorageResult<Option<FormSchema>> {
        let index = self.index.read().map_err(|_| StorageError::lock_poisoned("index"))?;
        Ok(index.form(id).cloned())
    }

    fn create_form(&self, name: &str, fields: FieldMap) -> StorageResult<FormSchema> {
        let form = FormSchema::new(name, fields);
        let mut index = self.index.write().map_err(|_| StorageError::lock_poisoned("index"))?;
        index.put_form(form.clone());
        Ok(form)
    }

    fn update_form(
        &self,
        id: &FormId,
        name: &str,
        fields: FieldMap,
    ) -> StorageResult<Option<FormSchema>> {
        let mut index = self.index.write().map_err(|_| StorageError::lock_poisoned("index"))?;
        let Some(mut form) = index.form(id).cloned() else {
            return Ok(None);
        };
        form.replace(name, fields);
        index.put_form(form.clone());
        Ok(Some(form))
    }

    fn create_submission(
        &self,
        form_id: &FormId,
        answers: Vec<AnswerPair>,
    ) -> StorageResult<Submission> {
        let submission = Submission::new(form_id.clone(), answers);
        let mut index = self.index.write().map_err(|_| StorageError::lock_poisoned("index"))?;
        index.put_submission(submission.clone());
        Ok(submission)
    }

    fn get_submission(&self, id: &SubmissionId) -> StorageResult<Option<Submission>> {
        let index = self.index.read().map_err(|_| StorageError::lock_poisoned("index"))?;
        Ok(index.submission(id).cloned())
    }

    fn list_submissions_by_form(&self, form_id: &FormId) -> StorageResult<Vec<Submission>> {
        let index = self.index.read().map_err(|_| StorageError::lock_poisoned("index"))?;
        Ok(index.submissions_for(form_id))
    }

    fn list_submission_ids_by_form(&self, form_id: &FormId) -> StorageResult<Vec<SubmissionId>> {
        let index = self.index.read().map_err(|_| StorageError::lock_poisoned("index"))?;
        Ok(index.submission_ids(form_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldDefinition;

    fn fields() -> FieldMap {
        let mut fields = FieldMap::new();
        fields.insert("f1".into(), FieldDefinition::required("text", "Name?"));
        fields
    }

    #[test]
    fn test_create_and_get_form() {
        let store = InMemoryFormStore::new();
        let form = store.create_form("T", fields()).unwrap();

        let loaded = store.get_form(&form.id).unwrap().unwrap();
        assert_eq!(loaded, form);
        assert!(store.get_form(&FormId::new("missing")).unwrap().is_none());
    }

    #[test]
    fn test_update_missing_form_returns_none() {
        let store = InMemoryFormStore::new();
        let result = store
            .update_form(&FormId::new("missing"), "X", FieldMap::new())
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_update_replaces_wholesale() {
        let store = InMemoryFormStore::new();
        let form = store.create_form("T", fields()).unwrap();

        let updated = store
            .update_form(&form.id, "T2", FieldMap::new())
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, form.id);
        assert_eq!(updated.name, "T2");
        assert!(updated.fields.is_empty());
        assert_eq!(store.get_form(&form.id).unwrap().unwrap(), updated);
    }

    #[test]
    fn test_submissions_listed_in_creation_order() {
        let store = InMemoryFormStore::new();
        let form = store.create_form("T", fields()).unwrap();

        let first = store
            .create_submission(&form.id, vec![AnswerPair::new("Name?", "a")])
            .unwrap();
        let second = store
            .create_submission(&form.id, vec![AnswerPair::new("Name?", "b")])
            .unwrap();

        assert_eq!(
            store.list_submission_ids_by_form(&form.id).unwrap(),
            vec![first.id.clone(), second.id.clone()]
        );
        assert_eq!(
            store.list_submissions_by_form(&form.id).unwrap(),
            vec![first, second]
        );
    }

    #[test]
    fn test_unknown_form_lists_empty() {
        let store = InMemoryFormStore::new();
        assert!(store
            .list_submissions_by_form(&FormId::new("nope"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_index_put_submission_idempotent() {
        let mut index = StoreIndex::new();
        let submission = Submission::new("f".into(), vec![]);

        index.put_submission(submission.clone());
        index.put_submission(submission);

        assert_eq!(index.submission_count(), 1);
        assert_eq!(index.submission_ids(&"f".into()).len(), 1);
    }
}
