//! Form service
//!
//! The single entry point transports call into. Wires the registry,
//! materializer and query service over one injected store, and records
//! logs and metrics for every outcome.

use std::sync::Arc;

use super::error::{ErrorKind, FormsError, FormsResult};
use crate::observability::{log_event_with_fields, Event, MetricsRegistry, MetricsSnapshot};
use crate::schema::{AnswerMap, FieldMap, FormId, FormSchema, SchemaRegistry, SubmissionValidator};
use crate::storage::{FormStore, InMemoryFormStore};
use crate::submission::{
    AnswerPair, QueryService, Submission, SubmissionId, SubmissionMaterializer,
};

/// Facade over the form core
pub struct FormService {
    registry: SchemaRegistry,
    materializer: SubmissionMaterializer,
    query: QueryService,
    metrics: MetricsRegistry,
}

impl std::fmt::Debug for FormService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormService").finish_non_exhaustive()
    }
}

impl FormService {
    /// Create a service over the given store
    pub fn new(store: Arc<dyn FormStore>) -> Self {
        let registry = SchemaRegistry::new(Arc::clone(&store));
        let materializer = SubmissionMaterializer::new(registry.clone(), Arc::clone(&store));
        let query = QueryService::new(store);

        Self {
            registry,
            materializer,
            query,
            metrics: MetricsRegistry::new(),
        }
    }

    /// Create a service backed by volatile memory (for testing)
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryFormStore::new()))
    }

    pub fn create_form(&self, name: &str, fields: FieldMap) -> FormsResult<FormSchema> {
        let form = self.registry.create(name, fields).map_err(|e| self.observe_failure(e))?;

        self.metrics.increment_forms_created();
        let field_count = form.fields.len().to_string();
        log_event_with_fields(
            Event::FormCreated,
            &[("fields", field_count.as_str()), ("form_id", form.id.as_str())],
        );
        Ok(form)
    }

    pub fn get_form(&self, form_id: &FormId) -> FormsResult<FormSchema> {
        self.metrics.increment_reads();
        self.registry.get(form_id).map_err(|e| self.observe_failure(e))
    }

    pub fn update_form(
        &self,
        form_id: &FormId,
        name: &str,
        fields: FieldMap,
    ) -> FormsResult<FormSchema> {
        let form = self
            .registry
            .update(form_id, name, fields)
            .map_err(|e| self.observe_failure(e))?;

        self.metrics.increment_forms_updated();
        let field_count = form.fields.len().to_string();
        log_event_with_fields(
            Event::FormUpdated,
            &[("fields", field_count.as_str()), ("form_id", form.id.as_str())],
        );
        Ok(form)
    }

    /// Validate and persist a submission
    pub fn submit(&self, form_id: &FormId, answers: &AnswerMap) -> FormsResult<Submission> {
        match self.materializer.create(form_id, answers) {
            Ok(submission) => {
                self.metrics.increment_submissions_created();
                let answer_count = submission.answers.len().to_string();
                log_event_with_fields(
                    Event::SubmissionCreated,
                    &[
                        ("answers", answer_count.as_str()),
                        ("form_id", form_id.as_str()),
                        ("submission_id", submission.id.as_str()),
                    ],
                );
                Ok(submission)
            }
            Err(e) if e.kind() == ErrorKind::StorageFailure => Err(self.observe_failure(e)),
            Err(e) => {
                self.metrics.increment_submissions_rejected();
                let reason = e.message();
                log_event_with_fields(
                    Event::SubmissionRejected,
                    &[
                        ("code", e.code()),
                        ("form_id", form_id.as_str()),
                        ("reason", reason.as_str()),
                    ],
                );
                Err(e)
            }
        }
    }

    /// Resolve answers against the current schema without persisting
    pub fn dry_run(&self, form_id: &FormId, answers: &AnswerMap) -> FormsResult<Vec<AnswerPair>> {
        self.metrics.increment_reads();
        let schema = self.registry.get(form_id).map_err(|e| self.observe_failure(e))?;
        Ok(SubmissionValidator::new(&schema).validate(answers)?)
    }

    pub fn get_submission(&self, id: &SubmissionId) -> FormsResult<Submission> {
        self.metrics.increment_reads();
        self.query.get_by_id(id).map_err(|e| self.observe_failure(e))
    }

    /// Submissions of a form, oldest first. Unknown forms list empty.
    pub fn list_submissions(&self, form_id: &FormId) -> FormsResult<Vec<Submission>> {
        self.metrics.increment_reads();
        self.query.list_by_form(form_id).map_err(|e| self.observe_failure(e))
    }

    pub fn list_submission_ids(&self, form_id: &FormId) -> FormsResult<Vec<SubmissionId>> {
        self.metrics.increment_reads();
        self.registry
            .list_submission_ids(form_id)
            .map_err(|e| self.observe_failure(e))
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Logs storage failures with their full detail. Client errors pass
    /// through untouched.
    fn observe_failure(&self, err: FormsError) -> FormsError {
        if let FormsError::Storage(ref storage) = err {
            self.metrics.increment_storage_failures();
            let detail = storage.to_string();
            log_event_with_fields(
                Event::StorageFailure,
                &[("code", storage.code().code()), ("detail", detail.as_str())],
            );
        }
        err
    }
}
