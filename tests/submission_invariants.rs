//! Submission Pipeline Invariant Tests
//!
//! - Required fields are checked fail-fast in schema order
//! - Accepted submissions carry one pair per answered, known field
//! - Persisted answer order follows the payload
//! - Submissions are frozen against later schema edits
//! - Unknown forms list empty, unknown submissions are not found

use aeroforms::core::{ErrorKind, FormService};
use aeroforms::schema::{AnswerMap, FieldDefinition, FieldMap, FormId, FormSchema, SubmissionValidator};
use aeroforms::submission::{AnswerPair, SubmissionId};

fn answers(entries: &[(&str, &str)]) -> AnswerMap {
    entries
        .iter()
        .map(|(k, v)| ((*k).into(), (*v).to_string()))
        .collect()
}

fn schema(fields: &[(&str, &str, bool)]) -> FormSchema {
    let mut map = FieldMap::new();
    for (id, prompt, required) in fields {
        let def = if *required {
            FieldDefinition::required("text", *prompt)
        } else {
            FieldDefinition::optional("text", *prompt)
        };
        map.insert((*id).into(), def);
    }
    FormSchema::new("T", map)
}

// =============================================================================
// Required-field checking
// =============================================================================

#[test]
fn test_first_missing_required_field_in_schema_order() {
    let schema = schema(&[
        ("c", "Third?", false),
        ("b", "Second?", true),
        ("a", "First?", true),
    ]);

    // Both b and a are missing; b is declared first
    let err = SubmissionValidator::new(&schema)
        .validate(&answers(&[("c", "x")]))
        .unwrap_err();
    assert_eq!(err.message(), "Missing required field: Second?");

    // Only a is missing
    let err = SubmissionValidator::new(&schema)
        .validate(&answers(&[("b", "y")]))
        .unwrap_err();
    assert_eq!(err.message(), "Missing required field: First?");
}

#[test]
fn test_empty_answer_counts_as_missing() {
    let schema = schema(&[("a", "First?", true)]);
    let err = SubmissionValidator::new(&schema)
        .validate(&answers(&[("a", "")]))
        .unwrap_err();
    assert_eq!(err.message(), "Missing required field: First?");
}

#[test]
fn test_optional_fields_may_be_empty_or_absent() {
    let schema = schema(&[("a", "First?", false), ("b", "Second?", false)]);

    let pairs = SubmissionValidator::new(&schema)
        .validate(&answers(&[("b", "")]))
        .unwrap();
    assert_eq!(pairs, vec![AnswerPair::new("Second?", "")]);

    assert!(SubmissionValidator::new(&schema)
        .validate(&AnswerMap::new())
        .unwrap()
        .is_empty());
}

// =============================================================================
// Resolution
// =============================================================================

#[test]
fn test_pairs_follow_payload_order() {
    let schema = schema(&[("f1", "Name?", false), ("f2", "Age?", false)]);

    let pairs = SubmissionValidator::new(&schema)
        .validate(&answers(&[("f2", "b"), ("f1", "a")]))
        .unwrap();

    assert_eq!(
        pairs,
        vec![AnswerPair::new("Age?", "b"), AnswerPair::new("Name?", "a")]
    );
}

#[test]
fn test_round_trip_pairs() {
    let schema = schema(&[("f1", "Name?", false), ("f2", "Age?", false)]);

    let pairs = SubmissionValidator::new(&schema)
        .validate(&answers(&[("f1", "a"), ("f2", "b")]))
        .unwrap();

    assert_eq!(
        pairs,
        vec![AnswerPair::new("Name?", "a"), AnswerPair::new("Age?", "b")]
    );
}

#[test]
fn test_unknown_field_is_rejected_by_name() {
    let service = FormService::in_memory();
    let form = service.create_form("T", schema(&[("f1", "Name?", true)]).fields).unwrap();

    let err = service
        .submit(&form.id, &answers(&[("f1", "Jo"), ("ghost", "boo")]))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UnresolvedField);
    assert_eq!(err.code(), "AERO_UNRESOLVED_FIELD");
    assert!(err.message().contains("ghost"));
    assert!(service.list_submissions(&form.id).unwrap().is_empty());
}

// =============================================================================
// End-to-end scenarios
// =============================================================================

#[test]
fn test_required_name_scenario() {
    let service = FormService::in_memory();
    let form = service
        .create_form("T", schema(&[("f1", "Name?", true)]).fields)
        .unwrap();

    let err = service.submit(&form.id, &AnswerMap::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.message().contains("Name?"));
    assert!(service.list_submission_ids(&form.id).unwrap().is_empty());

    let submission = service.submit(&form.id, &answers(&[("f1", "Jo")])).unwrap();
    assert_eq!(submission.form_id, form.id);
    assert_eq!(submission.answers, vec![AnswerPair::new("Name?", "Jo")]);
    assert_eq!(submission.created_at, submission.updated_at);
}

#[test]
fn test_submission_unchanged_by_schema_edit() {
    let service = FormService::in_memory();
    let form = service
        .create_form("T", schema(&[("f1", "Name?", true), ("f2", "Age?", false)]).fields)
        .unwrap();
    let submission = service
        .submit(&form.id, &answers(&[("f1", "Jo"), ("f2", "41")]))
        .unwrap();

    let first_read = service.get_submission(&submission.id).unwrap();

    // Rename one prompt and drop the other field entirely
    service
        .update_form(&form.id, "T2", schema(&[("f1", "Full name?", true)]).fields)
        .unwrap();

    let second_read = service.get_submission(&submission.id).unwrap();
    assert_eq!(first_read, second_read);
    assert_eq!(
        second_read.answers,
        vec![AnswerPair::new("Name?", "Jo"), AnswerPair::new("Age?", "41")]
    );
}

#[test]
fn test_new_submissions_use_updated_schema() {
    let service = FormService::in_memory();
    let form = service
        .create_form("T", schema(&[("f1", "Name?", false)]).fields)
        .unwrap();
    service
        .update_form(&form.id, "T", schema(&[("f1", "Full name?", false)]).fields)
        .unwrap();

    let submission = service.submit(&form.id, &answers(&[("f1", "Jo")])).unwrap();
    assert_eq!(submission.answers[0].prompt, "Full name?");
}

#[test]
fn test_list_by_form_with_no_submissions_is_empty() {
    let service = FormService::in_memory();
    let form = service.create_form("T", FieldMap::new()).unwrap();

    assert!(service.list_submissions(&form.id).unwrap().is_empty());
    assert!(service.list_submissions(&FormId::new("never-created")).unwrap().is_empty());
}

#[test]
fn test_get_unknown_submission_not_found() {
    let service = FormService::in_memory();
    let err = service.get_submission(&SubmissionId::generate()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.status_code(), 404);
}

#[test]
fn test_submit_to_unknown_form_not_found() {
    let service = FormService::in_memory();
    let err = service
        .submit(&FormId::new("never-created"), &answers(&[("f1", "Jo")]))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.code(), "AERO_FORM_NOT_FOUND");
}

#[test]
fn test_submissions_are_independent_across_threads() {
    use std::sync::Arc;
    use std::thread;

    let service = Arc::new(FormService::in_memory());
    let form = service
        .create_form("T", schema(&[("f1", "Name?", true)]).fields)
        .unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let service = Arc::clone(&service);
            let form_id = form.id.clone();
            thread::spawn(move || {
                let value = i.to_string();
                service
                    .submit(&form_id, &answers(&[("f1", value.as_str())]))
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(service.list_submission_ids(&form.id).unwrap().len(), 8);
    assert_eq!(service.metrics().submissions_created, 8);
}
