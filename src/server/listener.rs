//! TCP Listener
//!
//! Accepts connections and runs each one in its own task. The tasks live in
//! a [`JoinSet`] owned by the listener, so finished handlers are reaped as
//! the loop runs and in-flight handlers can be joined on shutdown.
//!
//! There is no limit on concurrent connections and no per-connection
//! timeout: a client that stops sending holds its own handler open until it
//! disconnects.

use crate::config::ServerConfig;
use crate::connection::handle_connection;
use crate::server::ServerContext;
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::{JoinError, JoinSet};
use tracing::{error, info};

/// Accept loop plus the set of running connection handlers.
pub struct Listener {
    listener: TcpListener,
    context: Arc<ServerContext>,
    connections: JoinSet<()>,
}

impl Listener {
    /// Prepares the storage directory and binds the configured address.
    pub async fn bind(config: &ServerConfig) -> io::Result<Self> {
        let context = ServerContext::open(&config.storage_dir, config.limits).await?;
        info!(directory = %config.storage_dir.display(), "Storage directory ready");

        let listener = TcpListener::bind(config.bind_address()).await?;
        Ok(Self::new(listener, Arc::new(context)))
    }

    /// Wraps an already bound listener.
    pub fn new(listener: TcpListener, context: Arc<ServerContext>) -> Self {
        Self {
            listener,
            context,
            connections: JoinSet::new(),
        }
    }

    /// Returns the address the listener is bound to.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts connections forever.
    pub async fn run(self) {
        self.run_until(std::future::pending::<()>()).await
    }

    /// Accepts connections until `shutdown` completes, then waits for the
    /// connections still in flight.
    pub async fn run_until<F>(mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        if let Ok(addr) = self.local_addr() {
            info!("Waiting for connections on {}", addr);
        }

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, addr)) => {
                        let context = Arc::clone(&self.context);
                        self.connections.spawn(handle_connection(stream, addr, context));
                    }
                    Err(e) => {
                        error!("Failed to accept connection: {}", e);
                    }
                },
                Some(joined) = self.connections.join_next(), if !self.connections.is_empty() => {
                    reap(joined);
                }
            }
        }

        info!(
            in_flight = self.connections.len(),
            "Stopped accepting connections, waiting for handlers"
        );
        while let Some(joined) = self.connections.join_next().await {
            reap(joined);
        }
    }
}

fn reap(joined: Result<(), JoinError>) {
    if let Err(e) = joined {
        error!(error = %e, "Connection task failed");
    }
}
