//! Server Configuration
//!
//! Startup settings for the filestat server. The `filestat` binary fills a
//! [`ServerConfig`] from its command line; tests build one directly.

use crate::storage::ReceiveLimits;
use crate::{DEFAULT_HOST, DEFAULT_PORT, DEFAULT_STORAGE_DIR};
use std::path::PathBuf;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Directory for uploaded files and the analysis log
    pub storage_dir: PathBuf,
    /// Limits applied to every request
    pub limits: ReceiveLimits,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            limits: ReceiveLimits::default(),
        }
    }
}

impl ServerConfig {
    /// Returns the bind address as a string
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address(), "0.0.0.0:9000");
        assert_eq!(config.storage_dir, PathBuf::from("storage"));
        assert_eq!(config.limits.max_file_size, 100 * 1024 * 1024);
        assert_eq!(config.limits.chunk_size, 64 * 1024);
    }
}
