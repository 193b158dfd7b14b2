//! Observability subsystem for aeroforms
//!
//! - Structured logging (JSON lines)
//! - Counter metrics
//! - Typed lifecycle events
//!
//! Observability never changes the outcome of an operation and never
//! spawns background work.
//!
//! ```ignore
//! use aeroforms::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::FormCreated, &[("form_id", "f-1")]);
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

/// Log a lifecycle event at its own severity
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
