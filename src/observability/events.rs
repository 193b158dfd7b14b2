//! Observable events
//!
//! Events are explicit and typed.

use std::fmt;

use super::logger::Severity;

/// Observable events in aeroforms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & lifecycle
    BootStart,
    BootComplete,
    ConfigLoaded,
    /// Store opened and replayed
    StoreOpened,
    /// Torn trailing record discarded during replay
    StoreTailTruncated,
    /// Writer refuses further appends
    StoreHalted,

    // Forms
    FormCreated,
    FormUpdated,

    // Submissions
    SubmissionCreated,
    /// Submission refused by validation
    SubmissionRejected,

    /// Storage collaborator returned an error
    StorageFailure,

    /// Transport ready for requests
    Serving,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "BOOT_START",
            Event::BootComplete => "BOOT_COMPLETE",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::StoreOpened => "STORE_OPENED",
            Event::StoreTailTruncated => "STORE_TAIL_TRUNCATED",
            Event::StoreHalted => "STORE_HALTED",
            Event::FormCreated => "FORM_CREATED",
            Event::FormUpdated => "FORM_UPDATED",
            Event::SubmissionCreated => "SUBMISSION_CREATED",
            Event::SubmissionRejected => "SUBMISSION_REJECTED",
            Event::StorageFailure => "STORAGE_FAILURE",
            Event::Serving => "SERVING",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::StoreTailTruncated | Event::SubmissionRejected => Severity::Warn,
            Event::StorageFailure | Event::StoreHalted => Severity::Error,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::BootStart.as_str(), "BOOT_START");
        assert_eq!(Event::StoreTailTruncated.as_str(), "STORE_TAIL_TRUNCATED");
        assert_eq!(Event::SubmissionRejected.to_string(), "SUBMISSION_REJECTED");
    }

    #[test]
    fn test_event_severity() {
        assert_eq!(Event::FormCreated.severity(), Severity::Info);
        assert_eq!(Event::StoreTailTruncated.severity(), Severity::Warn);
        assert_eq!(Event::StorageFailure.severity(), Severity::Error);
    }
}
