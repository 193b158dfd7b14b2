//! JSON-lines API
//!
//! One request object per line in, one response object per line out.
//!
//! # Supported Operations
//!
//! - create_form
//! - get_form
//! - update_form
//! - submit
//! - get_submission
//! - list_submissions
//! - list_submission_ids

mod errors;
mod handler;
mod request;
mod response;

pub use errors::{ApiError, ApiErrorCode, ApiResult};
pub use handler::ApiHandler;
pub use request::{Request, OPERATIONS};
pub use response::{ErrorResponse, Response, ResponseData, SuccessResponse};
