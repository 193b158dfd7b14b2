//! JSON-lines request handler
//!
//! Request handling flow:
//! 1. Parse the line
//! 2. Dispatch to [`FormService`]
//! 3. Render the result or pass the error code through
//!
//! Requests share no lock; concurrency is whatever the store allows.

use std::sync::Arc;

use super::errors::ApiResult;
use super::request::Request;
use super::response::{Response, ResponseData};
use crate::core::FormService;

/// API handler over a shared form service
#[derive(Clone)]
pub struct ApiHandler {
    service: Arc<FormService>,
}

impl ApiHandler {
    pub fn new(service: Arc<FormService>) -> Self {
        Self { service }
    }

    /// Handle one raw JSON request line
    pub fn handle(&self, json_request: &str) -> Response {
        match Request::parse(json_request).and_then(|request| self.dispatch(request)) {
            Ok(data) => Response::success(data),
            Err(err) => Response::error(&err),
        }
    }

    fn dispatch(&self, request: Request) -> ApiResult<ResponseData> {
        let data = match request {
            Request::CreateForm { name, fields } => {
                ResponseData::Form(self.service.create_form(&name, fields)?)
            }
            Request::GetForm { form_id } => ResponseData::Form(self.service.get_form(&form_id)?),
            Request::UpdateForm {
                form_id,
                name,
                fields,
            } => ResponseData::Form(self.service.update_form(&form_id, &name, fields)?),
            Request::Submit { form_id, answers } => {
                ResponseData::Submission(self.service.submit(&form_id, &answers)?)
            }
            Request::GetSubmission { submission_id } => {
                ResponseData::Submission(self.service.get_submission(&submission_id)?)
            }
            Request::ListSubmissions { form_id } => {
                ResponseData::Submissions(self.service.list_submissions(&form_id)?)
            }
            Request::ListSubmissionIds { form_id } => {
                ResponseData::SubmissionIds(self.service.list_submission_ids(&form_id)?)
            }
        };
        Ok(data)
    }
}
