//! # Form core
//!
//! [`FormService`] is the boundary every transport calls. Each operation
//! is an independent unit of work and returns a [`FormsError`] value on
//! failure; nothing here panics or retries.

pub mod error;
mod service;

pub use error::{ErrorKind, FormsError, FormsResult};
pub use service::FormService;
