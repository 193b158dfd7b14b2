//! Storage subsystem for aeroforms
//!
//! The form core consumes storage only through the [`FormStore`] trait.
//! Two backends are provided:
//!
//! - [`InMemoryFormStore`]: volatile, for tests and throwaway instances
//! - [`FileFormStore`]: append-only, checksummed log at
//!   `<data_dir>/data/forms.log`
//!
//! # Design Principles
//!
//! - Append-only (no in-place updates)
//! - Checksum-verified on every read
//! - One record per submission (submission + all answers, atomically)
//! - Latest record wins for the same form id
//! - Torn trailing record discarded on open, mid-log corruption is fatal

mod backend;
mod checksum;
mod errors;
mod file;
mod reader;
mod record;
mod writer;

pub use backend::{FormStore, InMemoryFormStore, StoreIndex};
pub use checksum::compute_checksum;
pub use errors::{StorageError, StorageErrorCode, StorageResult};
pub use file::FileFormStore;
pub use reader::LogReader;
pub use record::{LogRecord, RecordKind};
pub use writer::{log_path, LogWriter, LOG_FILE_NAME};
