//! Shared Analysis Log
//!
//! Every connection appends its analysis blocks to a single text file,
//! `analysis_result.txt`, in the storage directory. Connections run
//! concurrently, so appends go through one mutex-guarded file handle owned
//! by the server for its whole lifetime.
//!
//! ```text
//!  conn A ──┐
//!  conn B ──┼──> Mutex<File> ──> analysis_result.txt (append-only)
//!  conn C ──┘
//! ```
//!
//! Each append is written completely before the lock is released, so blocks
//! from different connections never interleave. Which connection lands
//! first is unspecified.
//!
//! The log grows without bound; there is no rotation.

use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::trace;

/// File name of the log inside the storage directory
pub const LOG_FILE_NAME: &str = "analysis_result.txt";

/// Append-only handle to the analysis log.
#[derive(Debug)]
pub struct AnalysisLog {
    path: PathBuf,
    file: Mutex<File>,
}

impl AnalysisLog {
    /// Opens (or creates) the log inside `directory`.
    pub async fn open(directory: impl AsRef<Path>) -> io::Result<Self> {
        let path = directory.as_ref().join(LOG_FILE_NAME);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;

        Ok(Self::from_file(path, file))
    }

    /// Wraps an already opened log file.
    pub fn from_file(path: impl Into<PathBuf>, file: File) -> Self {
        Self {
            path: path.into(),
            file: Mutex::new(file),
        }
    }

    /// Returns the location of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `text` as one uninterrupted write.
    pub async fn append(&self, text: &str) -> io::Result<()> {
        let mut file = self.file.lock().await;
        file.write_all(text.as_bytes()).await?;
        file.flush().await?;
        trace!(bytes = text.len(), "Appended to analysis log");
        Ok(())
    }
}
