//! # aeroforms
//!
//! A strict, self-describing form submission store.
//!
//! Forms are defined at runtime as ordered sets of fields. Submissions are
//! validated against the form's current schema and stored as frozen
//! (prompt, answer) pairs, so later edits to a form never rewrite history.
//!
//! - [`schema`]: form shape, registry, validation
//! - [`submission`]: materialization and read-back
//! - [`storage`]: the storage collaborator and its backends
//! - [`core`]: the [`core::FormService`] boundary
//! - [`api`], [`http_server`], [`cli`]: transports and process wiring

pub mod api;
pub mod cli;
pub mod core;
pub mod http_server;
pub mod observability;
pub mod schema;
pub mod storage;
pub mod submission;
