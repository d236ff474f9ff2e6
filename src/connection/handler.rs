//! Connection Handler Module
//!
//! This module handles individual client connections to filestat.
//! Each client gets its own handler task that runs one request through a
//! fixed pipeline and then closes the connection.
//!
//! ## Connection Lifecycle
//!
//! ```text
//! 1. Client connects (TCP handshake)
//!        │
//!        ▼
//! 2. ConnectionHandler spawned
//!        │
//!        ▼
//! 3. ┌──────────────────────────────┐
//!    │  Receiving                   │  FileReceiver writes uploads to disk
//!    │      │                       │
//!    │      ▼                       │
//!    │  Analyzing                   │  TextAnalyzer counts every file
//!    │      │                       │
//!    │      ▼                       │
//!    │  Logging                     │  report appended to analysis_result.txt
//!    │      │                       │
//!    │      ▼                       │
//!    │  Responding                  │  report written back to the client
//!    └──────┬───────────────────────┘
//!           │            any failure ──> Errored
//!           ▼
//! 4. Done / Errored: connection shut down
//! ```
//!
//! A failing connection is logged and closed without a response. It never
//! affects the listener or other connections.

use crate::analysis::{format_report, AnalysisError, TextAnalyzer};
use crate::server::ServerContext;
use crate::storage::{FileReceiver, ReceiveError};
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, info, trace, warn};

/// Pipeline stage of a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerState {
    Receiving,
    Analyzing,
    Logging,
    Responding,
    Done,
    Errored,
}

impl fmt::Display for HandlerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandlerState::Receiving => "receiving",
            HandlerState::Analyzing => "analyzing",
            HandlerState::Logging => "logging",
            HandlerState::Responding => "responding",
            HandlerState::Done => "done",
            HandlerState::Errored => "errored",
        };
        f.write_str(name)
    }
}

/// Handles a single client connection.
///
/// Generic over the stream so the pipeline can run on anything that reads
/// and writes bytes, not only TCP sockets.
pub struct ConnectionHandler<S> {
    /// The client stream
    stream: S,

    /// Client description (for logging)
    peer: String,

    /// Shared server state
    context: Arc<ServerContext>,

    state: HandlerState,
}

impl<S> ConnectionHandler<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Creates a new connection handler.
    ///
    /// # Arguments
    ///
    /// * `stream` - The client stream
    /// * `peer` - Printable client identity, usually its socket address
    /// * `context` - State shared with all other connections
    pub fn new(stream: S, peer: impl fmt::Display, context: Arc<ServerContext>) -> Self {
        Self {
            stream,
            peer: peer.to_string(),
            context,
            state: HandlerState::Receiving,
        }
    }

    /// Returns the current pipeline stage.
    pub fn state(&self) -> HandlerState {
        self.state
    }

    /// Runs the pipeline to completion and closes the stream.
    pub async fn run(mut self) -> Result<(), ConnectionError> {
        info!(client = %self.peer, "Client connected");

        let result = match self.receive().await {
            Ok(paths) => self.process(paths).await,
            Err(e) => Err(e),
        };

        self.finish(result).await
    }

    /// Records the outcome and closes the stream.
    async fn finish(
        mut self,
        result: Result<(), ConnectionError>,
    ) -> Result<(), ConnectionError> {
        match &result {
            Ok(()) => {
                self.transition(HandlerState::Done);
                info!(client = %self.peer, "Analysis results sent to client");
            }
            Err(e) => {
                warn!(client = %self.peer, stage = %self.state, error = %e, "Connection failed");
                self.transition(HandlerState::Errored);
            }
        }

        if let Err(e) = self.stream.shutdown().await {
            debug!(client = %self.peer, error = %e, "Failed to shut down stream");
        }
        info!(client = %self.peer, "Client disconnected");

        result
    }

    async fn receive(&mut self) -> Result<Vec<PathBuf>, ConnectionError> {
        let paths = FileReceiver::new(
            &mut self.stream,
            self.context.storage_dir(),
            self.context.limits(),
        )
        .receive_all()
        .await?;
        info!(client = %self.peer, files = paths.len(), "Files received");
        Ok(paths)
    }

    /// Analyze, log, respond.
    async fn process(&mut self, paths: Vec<PathBuf>) -> Result<(), ConnectionError> {
        self.transition(HandlerState::Analyzing);
        let results = TextAnalyzer::new(paths).await?.analyze().await?;

        self.transition(HandlerState::Logging);
        let report = format_report(&results);
        self.context
            .log()
            .append(&report)
            .await
            .map_err(ConnectionError::LogWriteFailure)?;

        self.transition(HandlerState::Responding);
        self.stream
            .write_all(report.as_bytes())
            .await
            .map_err(ConnectionError::ResponseWriteFailure)?;
        self.stream
            .flush()
            .await
            .map_err(ConnectionError::ResponseWriteFailure)?;

        Ok(())
    }

    fn transition(&mut self, next: HandlerState) {
        trace!(client = %self.peer, from = %self.state, to = %next, "State change");
        self.state = next;
    }
}

/// Errors that can end a connection.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    /// The request could not be received
    #[error("receive failed: {0}")]
    Receive(#[from] ReceiveError),

    /// The stored files could not be analyzed
    #[error("analysis failed: {0}")]
    Analysis(#[from] AnalysisError),

    /// Appending to the analysis log failed
    #[error("failed to write analysis log: {0}")]
    LogWriteFailure(#[source] std::io::Error),

    /// Sending the report to the client failed
    #[error("failed to write response: {0}")]
    ResponseWriteFailure(#[source] std::io::Error),
}

/// Handles a client connection.
///
/// This is a convenience function that creates a ConnectionHandler
/// and runs it to completion. Failures are already logged by the handler.
pub async fn handle_connection(stream: TcpStream, addr: SocketAddr, context: Arc<ServerContext>) {
    let handler = ConnectionHandler::new(stream, addr, context);
    let _ = handler.run().await;
}
