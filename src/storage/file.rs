//! Durable backend over the append-only form log
//!
//! Opening replays the log into a [`StoreIndex`]. Writes append first and
//! only then become visible in the index, so readers never observe a
//! record that is not on disk.

use std::path::Path;
use std::sync::{Mutex, RwLock};

use super::backend::{FormStore, StoreIndex};
use super::errors::{StorageError, StorageResult};
use super::reader::LogReader;
use super::record::LogRecord;
use super::writer::LogWriter;
use crate::observability::{log_event_with_fields, Event};
use crate::schema::{FieldMap, FormId, FormSchema};
use crate::submission::{AnswerPair, Submission, SubmissionId};

/// File-backed [`FormStore`].
pub struct FileFormStore {
    writer: Mutex<LogWriter>,
    index: RwLock<StoreIndex>,
}

impl FileFormStore {
    /// Opens (or creates) the store under `data_dir` and replays the log.
    ///
    /// A torn final record is truncated away. Any checksum failure aborts
    /// with `AERO_DATA_CORRUPTION`.
    pub fn open(data_dir: &Path) -> StorageResult<Self> {
        let mut writer = LogWriter::open(data_dir)?;
        let mut reader = LogReader::open(writer.path())?;

        let mut index = StoreIndex::new();
        while let Some(record) = reader.read_next()? {
            match record {
                LogRecord::FormPut(form) => index.put_form(form),
                LogRecord::SubmissionPut(submission) => index.put_submission(submission),
            }
        }

        if reader.torn_tail() {
            let valid_len = reader.current_offset();
            let discarded = (writer.current_offset() - valid_len).to_string();
            let offset = valid_len.to_string();
            log_event_with_fields(
                Event::StoreTailTruncated,
                &[("discarded_bytes", discarded.as_str()), ("offset", offset.as_str())],
            );
            writer.truncate_to(valid_len)?;
        }

        let forms = index.form_count().to_string();
        let path = writer.path().display().to_string();
        let submissions = index.submission_count().to_string();
        log_event_with_fields(
            Event::StoreOpened,
            &[
                ("forms", forms.as_str()),
                ("path", path.as_str()),
                ("submissions", submissions.as_str()),
            ],
        );

        Ok(Self {
            writer: Mutex::new(writer),
            index: RwLock::new(index),
        })
    }

    /// Appends a record, then applies it to the index.
    ///
    /// The writer lock is held across both steps so index order matches
    /// log order.
    fn commit(&self, record: LogRecord) -> StorageResult<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| StorageError::lock_poisoned("writer"))?;
        writer.append(&record)?;

        let mut index = self.index.write().map_err(|_| StorageError::lock_poisoned("index"))?;
        match record {
            LogRecord::FormPut(form) => index.put_form(form),
            LogRecord::SubmissionPut(submission) => index.put_submission(submission),
        }
        Ok(())
    }

    fn read_index(&self) -> StorageResult<std::sync::RwLockReadGuard<'_, StoreIndex>> {
        self.index.read().map_err(|_| StorageError::lock_poisoned("index"))
    }
}

impl FormStore for FileFormStore {
    fn get_form(&self, id: &FormId) -> StorageResult<Option<FormSchema>> {
        Ok(self.read_index()?.form(id).cloned())
    }

    fn create_form(&self, name: &str, fields: FieldMap) -> StorageResult<FormSchema> {
        let form = FormSchema::new(name, fields);
        self.commit(LogRecord::FormPut(form.clone()))?;
        Ok(form)
    }

    fn update_form(
        &self,
        id: &FormId,
        name: &str,
        fields: FieldMap,
    ) -> StorageResult<Option<FormSchema>> {
        let Some(mut form) = self.read_index()?.form(id).cloned() else {
            return Ok(None);
        };
        form.replace(name, fields);
        self.commit(LogRecord::FormPut(form.clone()))?;
        Ok(Some(form))
    }

    fn create_submission(
        &self,
        form_id: &FormId,
        answers: Vec<AnswerPair>,
    ) -> StorageResult<Submission> {
        let submission = Submission::new(form_id.clone(), answers);
        self.commit(LogRecord::SubmissionPut(submission.clone()))?;
        Ok(submission)
    }

    fn get_submission(&self, id: &SubmissionId) -> StorageResult<Option<Submission>> {
        Ok(self.read_index()?.submission(id).cloned())
    }

    fn list_submissions_by_form(&self, form_id: &FormId) -> StorageResult<Vec<Submission>> {
        Ok(self.read_index()?.submissions_for(form_id))
    }

    fn list_submission_ids_by_form(&self, form_id: &FormId) -> StorageResult<Vec<SubmissionId>> {
        Ok(self.read_index()?.submission_ids(form_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldDefinition;
    use tempfile::TempDir;

    fn fields() -> FieldMap {
        let mut fields = FieldMap::new();
        fields.insert("f1".into(), FieldDefinition::required("text", "Name?"));
        fields.insert("f2".into(), FieldDefinition::optional("text", "Age?"));
        fields
    }

    #[test]
    fn test_state_survives_reopen() {
        let tmp = TempDir::new().unwrap();
        let (form, submission) = {
            let store = FileFormStore::open(tmp.path()).unwrap();
            let form = store.create_form("T", fields()).unwrap();
            let submission = store
                .create_submission(&form.id, vec![AnswerPair::new("Name?", "Jo")])
                .unwrap();
            (form, submission)
        };

        let store = FileFormStore::open(tmp.path()).unwrap();
        assert_eq!(store.get_form(&form.id).unwrap().unwrap(), form);
        assert_eq!(store.get_submission(&submission.id).unwrap().unwrap(), submission);
        assert_eq!(
            store.list_submission_ids_by_form(&form.id).unwrap(),
            vec![submission.id]
        );
    }

    #[test]
    fn test_latest_form_put_wins_after_reopen() {
        let tmp = TempDir::new().unwrap();
        let form_id = {
            let store = FileFormStore::open(tmp.path()).unwrap();
            let form = store.create_form("v1", fields()).unwrap();
            store.update_form(&form.id, "v2", FieldMap::new()).unwrap();
            form.id
        };

        let store = FileFormStore::open(tmp.path()).unwrap();
        let form = store.get_form(&form_id).unwrap().unwrap();
        assert_eq!(form.name, "v2");
        assert!(form.fields.is_empty());
    }

    #[test]
    fn test_field_order_survives_reopen() {
        let tmp = TempDir::new().unwrap();
        let form_id = {
            let store = FileFormStore::open(tmp.path()).unwrap();
            store.create_form("T", fields()).unwrap().id
        };

        let store = FileFormStore::open(tmp.path()).unwrap();
        let form = store.get_form(&form_id).unwrap().unwrap();
        let keys: Vec<_> = form.fields.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["f1", "f2"]);
    }

    #[test]
    fn test_update_missing_form() {
        let tmp = TempDir::new().unwrap();
        let store = FileFormStore::open(tmp.path()).unwrap();
        assert!(store
            .update_form(&FormId::new("ghost"), "x", FieldMap::new())
            .unwrap()
            .is_none());
    }
}
