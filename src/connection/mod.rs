//! Connection Handler Module
//!
//! This module manages individual client connections to filestat.
//! Each client connection is handled by its own async task, so a slow or
//! stalled client only holds up its own request.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Listener                                │
//! │                 (server module)                             │
//! └──────────────────────┬──────────────────────────────────────┘
//!                        │
//!                        │ accept()
//!                        ▼
//!           ┌────────────────────────┐
//!           │   For each client...   │
//!           └────────────┬───────────┘
//!                        │
//!                        │ spawn task
//!                        ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 ConnectionHandler                           │
//! │                                                             │
//! │  ┌───────────┐  ┌───────────┐  ┌─────────┐  ┌────────────┐  │
//! │  │ Receiving │─>│ Analyzing │─>│ Logging │─>│ Responding │  │
//! │  └───────────┘  └───────────┘  └─────────┘  └────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use filestat::connection::handle_connection;
//! use filestat::server::ServerContext;
//! use std::sync::Arc;
//!
//! let context = Arc::new(ServerContext::open("storage", Default::default()).await?);
//!
//! // For each accepted connection...
//! let (stream, addr) = listener.accept().await?;
//! tokio::spawn(handle_connection(stream, addr, Arc::clone(&context)));
//! ```

pub mod handler;

// Re-export commonly used types
pub use handler::{handle_connection, ConnectionError, ConnectionHandler, HandlerState};
