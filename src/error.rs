//! Startup fault taxonomy
//!
//! Faults before the server reaches its listening state are fatal and bubble
//! up to `main` for a non-zero exit. Per-request faults never end up here;
//! they are converted to 500 responses in the handler layer.

use std::net::SocketAddr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("invalid listen address '{addr}': {source}")]
    Address {
        addr: String,
        source: std::net::AddrParseError,
    },

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("failed to initialize logging: {0}")]
    Logger(#[source] std::io::Error),

    #[error("failed to start runtime: {0}")]
    Runtime(#[source] std::io::Error),
}
