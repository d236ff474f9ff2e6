//! Server Module
//!
//! The accept loop and the state it shares with connection handlers.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ Listener                                                 │
//! │   TcpListener ── accept() ──> JoinSet<connection task>   │
//! │        │                              │                  │
//! │        └──── Arc<ServerContext> ──────┘                  │
//! │               ├── storage_dir                            │
//! │               ├── ReceiveLimits                          │
//! │               └── AnalysisLog (Mutex<File>)              │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use filestat::config::ServerConfig;
//! use filestat::server::Listener;
//!
//! let listener = Listener::bind(&ServerConfig::default()).await?;
//! listener.run_until(async { tokio::signal::ctrl_c().await.ok(); }).await;
//! ```

pub mod context;
pub mod listener;

// Re-export commonly used types
pub use context::ServerContext;
pub use listener::Listener;
