//! Form and submission HTTP routes
//!
//! Thin adapters: decode the body, call [`FormService`], map
//! [`FormsError`] onto its status code. Writes fsync the log, so they run
//! on the blocking pool instead of a runtime worker.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::core::{FormService, FormsError, FormsResult};
use crate::schema::{AnswerMap, FieldMap, FormId, FormSchema};
use crate::submission::{Submission, SubmissionId};

/// Body of `POST /forms` and `PUT /forms/:form_id`
#[derive(Debug, Deserialize)]
pub struct FormBody {
    pub name: String,
    #[serde(default)]
    pub fields: FieldMap,
}

/// Body of `POST /forms/:form_id/submissions`
#[derive(Debug, Deserialize)]
pub struct SubmissionBody {
    pub answers: AnswerMap,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    pub status: u16,
}

type RouteError = (StatusCode, Json<ErrorResponse>);
type RouteResult<T> = Result<T, RouteError>;

pub fn form_routes(service: Arc<FormService>) -> Router {
    Router::new()
        .route("/forms", post(create_form_handler))
        .route("/forms/:form_id", get(get_form_handler).put(update_form_handler))
        .route(
            "/forms/:form_id/submissions",
            get(list_submissions_handler).post(submit_handler),
        )
        .route("/forms/:form_id/submission-ids", get(list_submission_ids_handler))
        .route("/submissions/:submission_id", get(get_submission_handler))
        .with_state(service)
}

fn error_response(err: FormsError) -> RouteError {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(ErrorResponse {
            error: err.message(),
            code: err.code().to_string(),
            status: status.as_u16(),
        }),
    )
}

fn internal_error(message: String) -> RouteError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: message,
            code: "AERO_INTERNAL_ERROR".to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
        }),
    )
}

async fn run_blocking<T, F>(service: Arc<FormService>, op: F) -> RouteResult<T>
where
    F: FnOnce(&FormService) -> FormsResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || op(&service))
        .await
        .map_err(|e| internal_error(format!("Request task failed: {}", e)))?
        .map_err(error_response)
}

/// Decodes a JSON body straight into typed records, keeping key order.
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> RouteResult<T> {
    serde_json::from_slice(body).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("Invalid request body: {}", e),
                code: "AERO_INVALID_REQUEST".to_string(),
                status: StatusCode::BAD_REQUEST.as_u16(),
            }),
        )
    })
}

async fn create_form_handler(
    State(service): State<Arc<FormService>>,
    body: Bytes,
) -> RouteResult<(StatusCode, Json<FormSchema>)> {
    let body: FormBody = parse_body(&body)?;
    let form = run_blocking(service, move |service| {
        service.create_form(&body.name, body.fields)
    })
    .await?;
    Ok((StatusCode::CREATED, Json(form)))
}

async fn get_form_handler(
    State(service): State<Arc<FormService>>,
    Path(form_id): Path<String>,
) -> RouteResult<Json<FormSchema>> {
    service
        .get_form(&FormId::new(form_id))
        .map(Json)
        .map_err(error_response)
}

async fn update_form_handler(
    State(service): State<Arc<FormService>>,
    Path(form_id): Path<String>,
    body: Bytes,
) -> RouteResult<Json<FormSchema>> {
    let body: FormBody = parse_body(&body)?;
    let form_id = FormId::new(form_id);
    run_blocking(service, move |service| {
        service.update_form(&form_id, &body.name, body.fields)
    })
    .await
    .map(Json)
}

async fn submit_handler(
    State(service): State<Arc<FormService>>,
    Path(form_id): Path<String>,
    body: Bytes,
) -> RouteResult<(StatusCode, Json<Submission>)> {
    let body: SubmissionBody = parse_body(&body)?;
    let form_id = FormId::new(form_id);
    let submission =
        run_blocking(service, move |service| service.submit(&form_id, &body.answers)).await?;
    Ok((StatusCode::CREATED, Json(submission)))
}

async fn list_submissions_handler(
    State(service): State<Arc<FormService>>,
    Path(form_id): Path<String>,
) -> RouteResult<Json<Vec<Submission>>> {
    service
        .list_submissions(&FormId::new(form_id))
        .map(Json)
        .map_err(error_response)
}

async fn list_submission_ids_handler(
    State(service): State<Arc<FormService>>,
    Path(form_id): Path<String>,
) -> RouteResult<Json<Vec<SubmissionId>>> {
    service
        .list_submission_ids(&FormId::new(form_id))
        .map(Json)
        .map_err(error_response)
}

async fn get_submission_handler(
    State(service): State<Arc<FormService>>,
    Path(submission_id): Path<String>,
) -> RouteResult<Json<Submission>> {
    service
        .get_submission(&SubmissionId::new(submission_id))
        .map(Json)
        .map_err(error_response)
}
