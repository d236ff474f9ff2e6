//! Storage Module
//!
//! Everything filestat writes to disk lives in one storage directory:
//! the uploaded files and the shared analysis log.
//!
//! ## Layout
//!
//! ```text
//! storage/
//! ├── 3f2b…-91c4_notes.txt        ┐
//! ├── 8d10…-2e7a_notes.txt        ├─ FileReceiver, one file per upload
//! ├── c44e…-0b19_report.md        ┘
//! └── analysis_result.txt          ── AnalysisLog, shared, append-only
//! ```
//!
//! Uploaded files get a random UUID prefix, so concurrent connections never
//! write to the same path and need no locking. The log is the only shared
//! file and is guarded by a mutex.
//!
//! ## Example
//!
//! ```ignore
//! use filestat::storage::{AnalysisLog, FileReceiver, ReceiveLimits};
//!
//! let log = AnalysisLog::open("storage").await?;
//! let paths = FileReceiver::new(&mut stream, "storage", ReceiveLimits::default())
//!     .receive_all()
//!     .await?;
//! log.append("...").await?;
//! ```

pub mod log;
pub mod receiver;

// Re-export commonly used types
pub use log::{AnalysisLog, LOG_FILE_NAME};
pub use receiver::{
    base_name, unique_name, FileReceiver, ReceiveError, ReceiveLimits, DEFAULT_CHUNK_SIZE,
    DEFAULT_MAX_FILE_SIZE, DEFAULT_MAX_NAME_LENGTH,
};
