//! Storage failures
//!
//! | Code                        | Raised when                                             |
//! |-----------------------------|---------------------------------------------------------|
//! | `AERO_STORAGE_WRITE_FAILED` | appending, fsyncing or truncating the form log fails    |
//! | `AERO_STORAGE_READ_FAILED`  | replaying the form log hits an I/O error                |
//! | `AERO_STORAGE_HALTED`       | the store refuses writes (failed rollback, poisoned lock) |
//! | `AERO_DATA_CORRUPTION`      | a complete record fails framing, checksum or decoding   |
//!
//! Only corruption is fatal: the store will not open over a corrupt log.

use std::error::Error as StdError;
use std::fmt;
use std::io;

use super::record::{LogRecord, RecordKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorCode {
    AeroStorageWriteFailed,
    AeroStorageReadFailed,
    AeroStorageHalted,
    AeroDataCorruption,
}

impl StorageErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            StorageErrorCode::AeroStorageWriteFailed => "AERO_STORAGE_WRITE_FAILED",
            StorageErrorCode::AeroStorageReadFailed => "AERO_STORAGE_READ_FAILED",
            StorageErrorCode::AeroStorageHalted => "AERO_STORAGE_HALTED",
            StorageErrorCode::AeroDataCorruption => "AERO_DATA_CORRUPTION",
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, StorageErrorCode::AeroDataCorruption)
    }
}

impl fmt::Display for StorageErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A storage failure, with whatever is known about the record involved.
///
/// `subject` names the form or submission (`form=<id>`,
/// `submission=<id>`); `offset` is the byte position in the log.
#[derive(Debug)]
pub struct StorageError {
    code: StorageErrorCode,
    message: String,
    record_kind: Option<RecordKind>,
    subject: Option<String>,
    offset: Option<u64>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl StorageError {
    fn new(code: StorageErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            record_kind: None,
            subject: None,
            offset: None,
            source: None,
        }
    }

    pub fn write_failed(message: impl Into<String>, source: io::Error) -> Self {
        Self {
            source: Some(Box::new(source)),
            ..Self::new(StorageErrorCode::AeroStorageWriteFailed, message)
        }
    }

    pub fn read_failed(message: impl Into<String>, source: io::Error) -> Self {
        Self {
            source: Some(Box::new(source)),
            ..Self::new(StorageErrorCode::AeroStorageReadFailed, message)
        }
    }

    /// A record body could not be encoded; nothing reached the log.
    pub fn encode_failed(kind: RecordKind, source: serde_json::Error) -> Self {
        Self {
            record_kind: Some(kind),
            source: Some(Box::new(source)),
            ..Self::new(
                StorageErrorCode::AeroStorageWriteFailed,
                "Failed to encode record body",
            )
        }
    }

    /// The store cannot accept writes any more.
    pub fn halted(reason: impl Into<String>) -> Self {
        Self::new(StorageErrorCode::AeroStorageHalted, reason)
    }

    pub fn lock_poisoned(what: &str) -> Self {
        Self::halted(format!("{} lock poisoned", what))
    }

    pub fn corruption(offset: u64, reason: impl Into<String>) -> Self {
        Self::new(StorageErrorCode::AeroDataCorruption, reason).at_offset(offset)
    }

    /// Attach the kind and subject of the record being written.
    pub fn for_record(mut self, record: &LogRecord) -> Self {
        self.record_kind = Some(record.kind());
        self.subject = Some(match record {
            LogRecord::FormPut(form) => format!("form={}", form.id),
            LogRecord::SubmissionPut(submission) => format!("submission={}", submission.id),
        });
        self
    }

    pub fn with_kind(mut self, kind: RecordKind) -> Self {
        self.record_kind = Some(kind);
        self
    }

    pub fn at_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn code(&self) -> StorageErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn record_kind(&self) -> Option<RecordKind> {
        self.record_kind
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn offset(&self) -> Option<u64> {
        self.offset
    }

    pub fn is_fatal(&self) -> bool {
        self.code.is_fatal()
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = if self.is_fatal() { "FATAL" } else { "ERROR" };
        write!(f, "[{}] {}: {}", severity, self.code, self.message)?;

        let mut context = Vec::new();
        if let Some(kind) = self.record_kind {
            context.push(format!("kind={}", kind.as_str()));
        }
        if let Some(ref subject) = self.subject {
            context.push(subject.clone());
        }
        if let Some(offset) = self.offset {
            context.push(format!("offset={}", offset));
        }
        if !context.is_empty() {
            write!(f, " ({})", context.join(", "))?;
        }
        if let Some(ref source) = self.source {
            write!(f, ": {}", source)?;
        }
        Ok(())
    }
}

impl StdError for StorageError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

pub type StorageResult<T> = Result<T, StorageError>;
