//! Shared Server State
//!
//! The only state shared between connections: where to store files, the
//! request limits, and the analysis log handle.

use crate::storage::{AnalysisLog, ReceiveLimits};
use std::io;
use std::path::{Path, PathBuf};

/// State shared by every connection handler.
///
/// Lives in an `Arc` for the lifetime of the server.
#[derive(Debug)]
pub struct ServerContext {
    storage_dir: PathBuf,
    limits: ReceiveLimits,
    log: AnalysisLog,
}

impl ServerContext {
    /// Creates the storage directory if needed and opens the analysis log.
    pub async fn open(storage_dir: impl Into<PathBuf>, limits: ReceiveLimits) -> io::Result<Self> {
        let storage_dir = storage_dir.into();
        tokio::fs::create_dir_all(&storage_dir).await?;
        let log = AnalysisLog::open(&storage_dir).await?;

        Ok(Self::new(storage_dir, limits, log))
    }

    /// Builds a context around an existing log. `storage_dir` must exist.
    pub fn new(storage_dir: impl Into<PathBuf>, limits: ReceiveLimits, log: AnalysisLog) -> Self {
        Self {
            storage_dir: storage_dir.into(),
            limits,
            log,
        }
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    pub fn limits(&self) -> ReceiveLimits {
        self.limits
    }

    pub fn log(&self) -> &AnalysisLog {
        &self.log
    }
}
