//! Catalog backend configuration.

use std::path::PathBuf;

/// Catalog backend configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Data directory for snapshot persistence
    pub data_dir: PathBuf,
    /// Snapshot flush interval in seconds
    pub flush_interval_secs: u64,
    /// Request body read timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Response timeout in milliseconds
    pub response_timeout_ms: u64,
    /// API session lifetime in seconds
    pub session_ttl_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            flush_interval_secs: 30,
            request_timeout_ms: 5000,  // 5 seconds default
            response_timeout_ms: 10000, // 10 seconds default
            session_ttl_secs: 600,     // 10 minutes, matches token lifetime
        }
    }
}
