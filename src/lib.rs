//! # filestat - A TCP File Analysis Service
//!
//! filestat receives text files over a plain TCP connection, stores them,
//! counts their lines, words and characters, appends the results to a log
//! and sends the same report back to the client.
//!
//! ## Features
//!
//! - **Length-Prefixed Framing**: A tiny binary protocol with strict length validation
//! - **Streaming Uploads**: File content goes from socket to disk in bounded chunks
//! - **Concurrent Clients**: One Tokio task per connection, one task per analyzed file
//! - **Shared Log**: Appends from all connections serialized through one mutex
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                              filestat                                   │
//! │                                                                         │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐                  │
//! │  │ TCP Server  │───>│ Connection  │───>│   File      │──> storage dir   │
//! │  │ (Listener)  │    │  Handler    │    │  Receiver   │                  │
//! │  └─────────────┘    └──────┬──────┘    └─────────────┘                  │
//! │                            │                                            │
//! │                            ▼                                            │
//! │                     ┌─────────────┐    ┌──────────────────────────────┐ │
//! │                     │    Text     │    │ AnalysisLog                  │ │
//! │                     │  Analyzer   │    │ Mutex<File>                  │ │
//! │                     │ (JoinSet)   │    │ analysis_result.txt          │ │
//! │                     └─────────────┘    └──────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use filestat::config::ServerConfig;
//! use filestat::server::Listener;
//! use filestat::client::Sender;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Server
//!     let listener = Listener::bind(&ServerConfig::default()).await?;
//!     tokio::spawn(listener.run());
//!
//!     // Client
//!     let report = Sender::new("127.0.0.1", 9000)
//!         .send_files(&["notes.txt"])
//!         .await?;
//!     print!("{report}");
//!     Ok(())
//! }
//! ```
//!
//! ## Module Overview
//!
//! - [`protocol`]: Length-prefixed frame codec
//! - [`storage`]: File receiver and the shared analysis log
//! - [`analysis`]: Line/word/character counting and report formatting
//! - [`connection`]: Per-connection receive → analyze → log → respond pipeline
//! - [`server`]: Accept loop and shared server state
//! - [`client`]: File sender
//! - [`config`]: Server configuration

pub mod analysis;
pub mod client;
pub mod config;
pub mod connection;
pub mod protocol;
pub mod server;
pub mod storage;

// Re-export commonly used types for convenience
pub use analysis::{format_report, FileAnalysis, TextAnalyzer};
pub use client::Sender;
pub use config::ServerConfig;
pub use connection::{handle_connection, ConnectionError, ConnectionHandler};
pub use protocol::FrameError;
pub use server::{Listener, ServerContext};
pub use storage::{AnalysisLog, FileReceiver, ReceiveLimits};

/// The default port filestat listens on
pub const DEFAULT_PORT: u16 = 9000;

/// The default host filestat binds to
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// The default storage directory
pub const DEFAULT_STORAGE_DIR: &str = "storage";

/// Version of filestat
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
