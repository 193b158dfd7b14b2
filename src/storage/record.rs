//! Form log record types
//!
//! Record format:
//!
//! ```text
//! +------------------+
//! | Record Length    | (u32 LE, whole record including this field)
//! +------------------+
//! | Record Kind      | (u8: 1 = form put, 2 = submission put)
//! +------------------+
//! | Body             | (JSON)
//! +------------------+
//! | Checksum         | (u32 LE)
//! +------------------+
//! ```
//!
//! Checksum covers all bytes except the checksum itself. A submission and
//! all of its answer pairs live in a single record, so a submission is
//! either entirely in the log or not at all.

use super::checksum::{compute_checksum, verify_checksum};
use super::errors::{StorageError, StorageResult};
use crate::schema::FormSchema;
use crate::submission::Submission;

/// Length prefix + kind + checksum
pub const MIN_RECORD_SIZE: usize = 4 + 1 + 4;

/// Record kind discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RecordKind {
    FormPut = 1,
    SubmissionPut = 2,
}

impl RecordKind {
    fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            1 => Some(RecordKind::FormPut),
            2 => Some(RecordKind::SubmissionPut),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::FormPut => "form_put",
            RecordKind::SubmissionPut => "submission_put",
        }
    }
}

/// One entry of the append-only form log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogRecord {
    /// Full form state; the latest record for an id wins
    FormPut(FormSchema),
    /// A complete submission with its answers
    SubmissionPut(Submission),
}

impl LogRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            LogRecord::FormPut(_) => RecordKind::FormPut,
            LogRecord::SubmissionPut(_) => RecordKind::SubmissionPut,
        }
    }

    fn body(&self) -> StorageResult<Vec<u8>> {
        let encoded = match self {
            LogRecord::FormPut(form) => serde_json::to_vec(form),
            LogRecord::SubmissionPut(submission) => serde_json::to_vec(submission),
        };
        encoded.map_err(|e| StorageError::encode_failed(self.kind(), e))
    }

    /// Serialize the complete record to bytes.
    pub fn serialize(&self) -> StorageResult<Vec<u8>> {
        let body = self.body()?;
        let record_length = (MIN_RECORD_SIZE + body.len()) as u32;

        let mut record = Vec::with_capacity(record_length as usize);
        record.extend_from_slice(&record_length.to_le_bytes());
        record.push(self.kind() as u8);
        record.extend_from_slice(&body);

        let checksum = compute_checksum(&record);
        record.extend_from_slice(&checksum.to_le_bytes());

        Ok(record)
    }

    /// Deserialize one complete record, verifying its checksum.
    ///
    /// `data` must hold exactly one record. `offset` is only used for
    /// error context.
    pub fn deserialize(data: &[u8], offset: u64) -> StorageResult<Self> {
        if data.len() < MIN_RECORD_SIZE {
            return Err(StorageError::corruption(offset, "Record too short"));
        }

        let declared = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;
        if declared != data.len() {
            return Err(StorageError::corruption(
                offset,
                format!("Record length mismatch: declared {}, got {}", declared, data.len()),
            ));
        }

        let checksum_start = data.len() - 4;
        let stored = u32::from_le_bytes([
            data[checksum_start],
            data[checksum_start + 1],
            data[checksum_start + 2],
            data[checksum_start + 3],
        ]);
        if !verify_checksum(&data[..checksum_start], stored) {
            return Err(StorageError::corruption(offset, "Checksum mismatch"));
        }

        let kind = RecordKind::from_byte(data[4]).ok_or_else(|| {
            StorageError::corruption(offset, format!("Unknown record kind {}", data[4]))
        })?;
        let body = &data[5..checksum_start];

        let record = match kind {
            RecordKind::FormPut => serde_json::from_slice(body).map(LogRecord::FormPut),
            RecordKind::SubmissionPut => {
                serde_json::from_slice(body).map(LogRecord::SubmissionPut)
            }
        };
        record.map_err(|e| {
            StorageError::corruption(offset, format!("Undecodable record body: {}", e))
                .with_kind(kind)
        })
    }
}
