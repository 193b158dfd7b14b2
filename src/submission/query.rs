//! Read-back of persisted submissions

use std::sync::Arc;

use super::types::{Submission, SubmissionId};
use crate::core::{FormsError, FormsResult};
use crate::schema::FormId;
use crate::storage::FormStore;

/// Read-only queries over submissions
#[derive(Clone)]
pub struct QueryService {
    store: Arc<dyn FormStore>,
}

impl QueryService {
    pub fn new(store: Arc<dyn FormStore>) -> Self {
        Self { store }
    }

    /// Fetches one submission.
    ///
    /// # Errors
    ///
    /// `FormsError::SubmissionNotFound` if the id is unknown.
    pub fn get_by_id(&self, id: &SubmissionId) -> FormsResult<Submission> {
        self.store
            .get_submission(id)?
            .ok_or_else(|| FormsError::SubmissionNotFound(id.clone()))
    }

    /// All submissions of a form, oldest first.
    ///
    /// An unknown form id yields an empty list, not an error.
    pub fn list_by_form(&self, form_id: &FormId) -> FormsResult<Vec<Submission>> {
        Ok(self.store.list_submissions_by_form(form_id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ErrorKind;
    use crate::schema::FieldMap;
    use crate::storage::InMemoryFormStore;
    use crate::submission::AnswerPair;

    #[test]
    fn test_get_by_id_is_stable() {
        let store: Arc<dyn FormStore> = Arc::new(InMemoryFormStore::new());
        let form = store.create_form("T", FieldMap::new()).unwrap();
        let created = store
            .create_submission(&form.id, vec![AnswerPair::new("Name?", "Jo")])
            .unwrap();
        let query = QueryService::new(store);

        assert_eq!(query.get_by_id(&created.id).unwrap(), created);
        assert_eq!(query.get_by_id(&created.id).unwrap(), created);
    }

    #[test]
    fn test_get_unknown_submission() {
        let query = QueryService::new(Arc::new(InMemoryFormStore::new()));
        let err = query.get_by_id(&SubmissionId::generate()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_list_unknown_form_is_empty() {
        let query = QueryService::new(Arc::new(InMemoryFormStore::new()));
        assert!(query.list_by_form(&FormId::new("nope")).unwrap().is_empty());
    }
}
