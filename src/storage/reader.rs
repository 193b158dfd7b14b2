//! Sequential reader for the form log
//!
//! - Every record is checksum-verified
//! - A checksum failure is fatal corruption
//! - A final record cut short by a crash is reported as a torn tail,
//!   never returned as data

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::errors::{StorageError, StorageResult};
use super::record::{LogRecord, MIN_RECORD_SIZE};

/// Reads log records front to back.
pub struct LogReader {
    log_path: PathBuf,
    reader: BufReader<File>,
    current_offset: u64,
    file_size: u64,
    torn_tail: bool,
}

impl LogReader {
    /// Opens the log file for reading.
    pub fn open(log_path: &Path) -> StorageResult<Self> {
        let file = File::open(log_path).map_err(|e| {
            StorageError::read_failed(format!("Failed to open log file: {}", log_path.display()), e)
        })?;

        let file_size = file
            .metadata()
            .map_err(|e| StorageError::read_failed("Failed to read file metadata", e))?
            .len();

        Ok(Self {
            log_path: log_path.to_path_buf(),
            reader: BufReader::new(file),
            current_offset: 0,
            file_size,
            torn_tail: false,
        })
    }

    /// Returns the log file path.
    pub fn path(&self) -> &Path {
        &self.log_path
    }

    /// Returns the offset just past the last complete record read.
    pub fn current_offset(&self) -> u64 {
        self.current_offset
    }

    /// Returns whether reading stopped at an incomplete trailing record.
    pub fn torn_tail(&self) -> bool {
        self.torn_tail
    }

    /// Reads the next record.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))` if a complete record was read
    /// - `Ok(None)` at end of log or at a torn tail (see [`Self::torn_tail`])
    /// - `Err(AERO_DATA_CORRUPTION)` if a complete record fails verification
    pub fn read_next(&mut self) -> StorageResult<Option<LogRecord>> {
        if self.torn_tail || self.current_offset >= self.file_size {
            return Ok(None);
        }

        let remaining = self.file_size - self.current_offset;
        if remaining < 4 {
            self.torn_tail = true;
            return Ok(None);
        }

        let mut len_buf = [0u8; 4];
        self.reader.read_exact(&mut len_buf).map_err(|e| {
            StorageError::read_failed(format!("Failed to read record length at {}", self.current_offset), e)
        })?;
        let record_length = u32::from_le_bytes(len_buf) as u64;

        if record_length < MIN_RECORD_SIZE as u64 {
            return Err(StorageError::corruption(
                self.current_offset,
                format!("Invalid record length {}", record_length),
            ));
        }

        if record_length > remaining {
            self.torn_tail = true;
            return Ok(None);
        }

        let mut data = vec![0u8; record_length as usize];
        data[..4].copy_from_slice(&len_buf);
        self.reader.read_exact(&mut data[4..]).map_err(|e| {
            StorageError::read_failed(format!("Failed to read record at {}", self.current_offset), e)
        })?;

        let record = LogRecord::deserialize(&data, self.current_offset)?;
        self.current_offset += record_length;

        Ok(Some(record))
    }

    /// Reads every complete record.
    pub fn read_all(&mut self) -> StorageResult<Vec<LogRecord>> {
        let mut records = Vec::new();
        while let Some(record) = self.read_next()? {
            records.push(record);
        }
        Ok(records)
    }
}
