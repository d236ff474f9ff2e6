//! File Sender
//!
//! Client side of the protocol: frames local files onto a connection and
//! collects the server's report.
//!
//! File content is streamed from disk straight into the socket, so large
//! files are never loaded into memory. The request is written in full
//! before the response is read; the server only replies once every file has
//! arrived.

use crate::protocol::{prefix_for, write_i32, write_length_prefixed, FrameError};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, info};

/// Errors that can occur while sending files.
#[derive(Debug, Error)]
pub enum SendError {
    /// Nothing to send
    #[error("no files to send")]
    NoFiles,

    /// The path has no file name component
    #[error("not a file path: {}", .0.display())]
    InvalidPath(PathBuf),

    /// Empty files cannot be framed; the server rejects zero lengths
    #[error("file is empty: {}", .0.display())]
    EmptyFile(PathBuf),

    /// The file does not fit a 32-bit length prefix
    #[error("file too large: {} ({size} bytes)", .path.display())]
    FileTooLarge { path: PathBuf, size: u64 },

    /// Framing error while writing the request
    #[error(transparent)]
    Frame(#[from] FrameError),

    /// I/O error on a local file or the connection
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The server closed the connection without replying
    #[error("server closed the connection without a response")]
    EmptyResponse,
}

/// Sends files to a filestat server.
///
/// # Example
///
/// ```ignore
/// use filestat::client::Sender;
///
/// let sender = Sender::new("127.0.0.1", 9000);
/// let report = sender.send_files(&["notes.txt"]).await?;
/// println!("{report}");
/// ```
#[derive(Debug, Clone)]
pub struct Sender {
    host: String,
    port: u16,
}

impl Sender {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Returns the server address as a string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Uploads `paths` over a new connection and returns the server's report.
    pub async fn send_files<P>(&self, paths: &[P]) -> Result<String, SendError>
    where
        P: AsRef<Path>,
    {
        let mut stream = TcpStream::connect(self.address()).await?;
        debug!(server = %self.address(), "Connected");

        write_request(&mut stream, paths).await?;
        stream.flush().await?;

        read_response(&mut stream).await
    }
}

/// Writes a complete request: file count, then name and content per file.
pub async fn write_request<W, P>(writer: &mut W, paths: &[P]) -> Result<(), SendError>
where
    W: AsyncWrite + Unpin,
    P: AsRef<Path>,
{
    if paths.is_empty() {
        return Err(SendError::NoFiles);
    }

    write_i32(writer, prefix_for(paths.len())?).await?;
    for path in paths {
        write_file(writer, path.as_ref()).await?;
    }

    Ok(())
}

/// Writes one file's name and content frames.
async fn write_file<W>(writer: &mut W, path: &Path) -> Result<(), SendError>
where
    W: AsyncWrite + Unpin,
{
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| SendError::InvalidPath(path.to_path_buf()))?;

    let file = File::open(path).await?;
    let size = file.metadata().await?.len();
    if size == 0 {
        return Err(SendError::EmptyFile(path.to_path_buf()));
    }
    let prefix = i32::try_from(size).map_err(|_| SendError::FileTooLarge {
        path: path.to_path_buf(),
        size,
    })?;

    write_length_prefixed(writer, name.as_bytes()).await?;
    write_i32(writer, prefix).await?;

    let copied = tokio::io::copy(&mut file.take(size), writer).await?;
    if copied != size {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("{} shrank while sending", path.display()),
        )
        .into());
    }

    info!(file = %name, bytes = size, "File sent");
    Ok(())
}

/// Reads the response until the server closes the connection.
pub async fn read_response<R>(reader: &mut R) -> Result<String, SendError>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).await?;

    if buf.is_empty() {
        return Err(SendError::EmptyResponse);
    }

    Ok(String::from_utf8_lossy(&buf).into_owned())
}
