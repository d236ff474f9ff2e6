//! File Receiver
//!
//! Drains a request stream and persists every file it carries into the
//! storage directory.
//!
//! ## Receive Sequence
//!
//! ```text
//! read_i32 ──> file count (> 0)
//!    │
//!    ▼  for each file
//! ┌──────────────────────────────────────────────┐
//! │ read_length_prefixed ──> name (UTF-8)        │
//! │ {uuid}_{base name}   ──> destination path    │
//! │ read_positive_length ──> content length      │
//! │ copy in chunks       ──> destination file    │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! File content is never held in memory as a whole; at most one chunk is
//! buffered at a time.
//!
//! Files written before a failure are left on disk. Cleanup is up to the
//! caller.

use crate::protocol::{read_i32, read_length_prefixed, read_positive_length, FrameError};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tracing::{debug, info};
use uuid::Uuid;

/// Default maximum size of a single uploaded file (100 MB)
pub const DEFAULT_MAX_FILE_SIZE: usize = 100 * 1024 * 1024;

/// Default size of the chunks copied from the socket to disk (64 KB)
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Default maximum length of an uploaded file name in bytes
pub const DEFAULT_MAX_NAME_LENGTH: usize = 4096;

/// Name used when an uploaded name has no usable base component
const FALLBACK_NAME: &str = "unnamed";

/// Longest file name most filesystems accept, in bytes
const MAX_STORED_NAME_LENGTH: usize = 255;

/// Hyphenated UUID plus the `_` separator
const UNIQUE_PREFIX_LENGTH: usize = 37;

/// Announced file counts above this are not used to presize the path list
const MAX_PREALLOCATED_FILES: usize = 64;

/// Limits applied to untrusted values read from a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiveLimits {
    /// Largest accepted content length
    pub max_file_size: usize,
    /// Buffer size for each socket-to-disk copy
    pub chunk_size: usize,
    /// Largest accepted file name length
    pub max_name_length: usize,
}

impl Default for ReceiveLimits {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_name_length: DEFAULT_MAX_NAME_LENGTH,
        }
    }
}

/// Errors that can occur while receiving files.
#[derive(Debug, Error)]
pub enum ReceiveError {
    /// The declared file count was zero or negative
    #[error("invalid file count: {0}")]
    InvalidFileCount(i32),

    /// The declared content length exceeds the configured maximum
    #[error("file too large: {size} bytes (max: {max})")]
    OversizedFile { size: usize, max: usize },

    /// The file name was not valid UTF-8
    #[error("file name is not valid UTF-8")]
    InvalidFileName(#[from] std::string::FromUtf8Error),

    /// Framing error on the request stream
    #[error(transparent)]
    Frame(#[from] FrameError),

    /// Creating or writing a stored file failed
    #[error("storage error: {0}")]
    Storage(#[source] std::io::Error),
}

/// Receives the files of one request into a directory.
///
/// # Example
///
/// ```ignore
/// use filestat::storage::{FileReceiver, ReceiveLimits};
///
/// let mut receiver = FileReceiver::new(&mut stream, "storage", ReceiveLimits::default());
/// let paths = receiver.receive_all().await?;
/// ```
pub struct FileReceiver<'a, R> {
    /// The request stream
    reader: &'a mut R,

    /// Where stored files are created
    directory: PathBuf,

    limits: ReceiveLimits,
}

impl<'a, R> FileReceiver<'a, R>
where
    R: AsyncRead + Unpin,
{
    /// Creates a receiver. `directory` must already exist.
    pub fn new(reader: &'a mut R, directory: impl Into<PathBuf>, limits: ReceiveLimits) -> Self {
        Self {
            reader,
            directory: directory.into(),
            limits,
        }
    }

    /// Receives every file of the request.
    ///
    /// Returns the on-disk paths in the order the files arrived.
    pub async fn receive_all(&mut self) -> Result<Vec<PathBuf>, ReceiveError> {
        let count = read_i32(&mut *self.reader).await?;
        if count <= 0 {
            return Err(ReceiveError::InvalidFileCount(count));
        }
        debug!(files = count, "Client announced files");

        let mut paths = Vec::with_capacity((count as usize).min(MAX_PREALLOCATED_FILES));
        for _ in 0..count {
            paths.push(self.receive_file().await?);
        }

        Ok(paths)
    }

    /// Receives a single name + content pair.
    async fn receive_file(&mut self) -> Result<PathBuf, ReceiveError> {
        let name_bytes =
            read_length_prefixed(&mut *self.reader, self.limits.max_name_length).await?;
        let name = String::from_utf8(name_bytes)?;

        let stored_name = unique_name(&name);
        let path = self.directory.join(&stored_name);

        let size = self.read_content_length().await?;
        self.copy_to_file(&path, size).await?;

        info!(file = %stored_name, bytes = size, "File saved");
        Ok(path)
    }

    /// Reads and validates the content length prefix.
    async fn read_content_length(&mut self) -> Result<usize, ReceiveError> {
        let size = read_positive_length(&mut *self.reader).await?;
        if size > self.limits.max_file_size {
            return Err(ReceiveError::OversizedFile {
                size,
                max: self.limits.max_file_size,
            });
        }

        Ok(size)
    }

    /// Streams exactly `size` bytes from the request into a new file.
    async fn copy_to_file(&mut self, path: &Path, size: usize) -> Result<(), ReceiveError> {
        let mut file = File::create(path).await.map_err(ReceiveError::Storage)?;
        let mut buf = vec![0u8; self.limits.chunk_size.clamp(1, size)];
        let mut total = 0;

        while total < size {
            let want = buf.len().min(size - total);
            let n = self
                .reader
                .read(&mut buf[..want])
                .await
                .map_err(FrameError::from)?;

            if n == 0 {
                return Err(FrameError::TruncatedStream {
                    expected: size,
                    received: total,
                }
                .into());
            }

            file.write_all(&buf[..n])
                .await
                .map_err(ReceiveError::Storage)?;
            total += n;
        }

        file.flush().await.map_err(ReceiveError::Storage)?;
        Ok(())
    }
}

/// Builds the stored name `{uuid}_{base name}` for an uploaded name.
///
/// Long base names are cut so the stored name stays within 255 bytes.
pub fn unique_name(uploaded: &str) -> String {
    let base = truncate_at_char_boundary(
        base_name(uploaded),
        MAX_STORED_NAME_LENGTH - UNIQUE_PREFIX_LENGTH,
    );
    format!("{}_{}", Uuid::new_v4(), base)
}

fn truncate_at_char_boundary(name: &str, max: usize) -> &str {
    if name.len() <= max {
        return name;
    }
    let mut end = max;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}

/// Strips every directory component from an uploaded name.
///
/// Both `/` and `\` count as separators whatever the host platform, so a
/// name can never climb out of the storage directory.
pub fn base_name(uploaded: &str) -> &str {
    let last = uploaded.rsplit(['/', '\\']).next().unwrap_or_default();
    match last {
        "" | "." | ".." => FALLBACK_NAME,
        name => name,
    }
}
