//! # HTTP transport
//!
//! # Endpoints
//!
//! - `POST /forms`, `GET|PUT /forms/:form_id`
//! - `GET|POST /forms/:form_id/submissions`
//! - `GET /forms/:form_id/submission-ids`
//! - `GET /submissions/:submission_id`
//! - `GET /health`, `GET /metrics`

pub mod config;
pub mod form_routes;
pub mod observability_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use server::HttpServer;
