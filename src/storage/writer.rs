//! Append-only writer for the form log
//!
//! - Records are appended with a single write followed by fsync
//! - A write is not acknowledged until fsync completes
//! - A failed append is rolled back to the previous end of log
//! - If the rollback fails too, the writer halts and refuses every later
//!   append, so nothing is ever acknowledged behind a partial record

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::errors::{StorageError, StorageResult};
use super::record::LogRecord;
use crate::observability::{log_event_with_fields, Event};

/// Log file name under `<data_dir>/data/`
pub const LOG_FILE_NAME: &str = "forms.log";

/// Returns the log path for a data directory.
pub fn log_path(data_dir: &Path) -> PathBuf {
    data_dir.join("data").join(LOG_FILE_NAME)
}

/// Writer that owns the tail of the form log.
pub struct LogWriter {
    log_path: PathBuf,
    file: File,
    current_offset: u64,
    halted: bool,
}

impl LogWriter {
    /// Opens or creates `<data_dir>/data/forms.log`.
    ///
    /// # Errors
    ///
    /// Returns `AERO_STORAGE_WRITE_FAILED` if the file cannot be created or opened.
    pub fn open(data_dir: &Path) -> StorageResult<Self> {
        let data_subdir = data_dir.join("data");
        let log_path = log_path(data_dir);

        if !data_subdir.exists() {
            fs::create_dir_all(&data_subdir).map_err(|e| {
                StorageError::write_failed(
                    format!("Failed to create data directory: {}", data_subdir.display()),
                    e,
                )
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&log_path)
            .map_err(|e| {
                StorageError::write_failed(
                    format!("Failed to open log file: {}", log_path.display()),
                    e,
                )
            })?;

        let current_offset = file
            .metadata()
            .map_err(|e| StorageError::write_failed("Failed to read file metadata", e))?
            .len();

        Ok(Self {
            log_path,
            file,
            current_offset,
            halted: false,
        })
    }

    /// Returns the path to the log file.
    pub fn path(&self) -> &Path {
        &self.log_path
    }

    /// Returns the current end-of-log offset.
    pub fn current_offset(&self) -> u64 {
        self.current_offset
    }

    /// Returns whether the writer has stopped accepting appends.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Appends a record with fsync enforcement.
    ///
    /// Returns the byte offset where the record starts.
    ///
    /// # Errors
    ///
    /// - `AERO_STORAGE_WRITE_FAILED` if the append failed and was rolled back
    /// - `AERO_STORAGE_HALTED` if the rollback failed, or an earlier one did
    pub fn append(&mut self, record: &LogRecord) -> StorageResult<u64> {
        let offset = self.current_offset;
        if self.halted {
            return Err(StorageError::halted("Log writer halted after a failed rollback")
                .for_record(record)
                .at_offset(offset));
        }

        let serialized = record.serialize()?;
        let written = self
            .file
            .write_all(&serialized)
            .and_then(|_| self.file.sync_all());

        let Err(write_err) = written else {
            self.current_offset += serialized.len() as u64;
            return Ok(offset);
        };

        if let Err(rollback_err) = self.file.set_len(offset).and_then(|_| self.file.sync_all()) {
            self.halted = true;
            let path = self.log_path.display().to_string();
            let offset_str = offset.to_string();
            let write_detail = write_err.to_string();
            let rollback_detail = rollback_err.to_string();
            log_event_with_fields(
                Event::StoreHalted,
                &[
                    ("offset", offset_str.as_str()),
                    ("path", path.as_str()),
                    ("rollback_error", rollback_detail.as_str()),
                    ("write_error", write_detail.as_str()),
                ],
            );
            return Err(StorageError::halted(format!(
                "Append failed ({}) and rollback failed ({})",
                write_err, rollback_err
            ))
            .for_record(record)
            .at_offset(offset));
        }

        Err(StorageError::write_failed("Failed to append record", write_err)
            .for_record(record)
            .at_offset(offset))
    }

    /// Cuts the log back to `offset`, discarding everything after it.
    pub fn truncate_to(&mut self, offset: u64) -> StorageResult<()> {
        self.file
            .set_len(offset)
            .and_then(|_| self.file.sync_all())
            .map_err(|e| {
                StorageError::write_failed("Failed to truncate log", e).at_offset(offset)
            })?;
        self.current_offset = offset;
        Ok(())
    }
}
