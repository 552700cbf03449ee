//! TCP listener setup.
//!
//! # Responsibilities
//! - Resolve the configured `host:port` bind address
//! - Bind the listening socket handed to the HTTP server
//!
//! Accepting and per-connection dispatch belong to the HTTP server; every
//! accepted connection runs on its own task.

use tokio::net::TcpListener;

use crate::config::ListenerConfig;
use crate::net::peer::{split_host_port, AddrError};

/// Error type for listener operations.
#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    /// The bind address is not in `host:port` form.
    #[error("invalid bind address: {0}")]
    Address(#[from] AddrError),

    /// Failed to bind to address.
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Bind the listening socket for the configured address.
pub async fn bind(config: &ListenerConfig) -> Result<TcpListener, ListenerError> {
    let address = config.bind_address.as_str();

    // Reject obviously malformed addresses before touching the resolver.
    split_host_port(address)?;

    let listener = TcpListener::bind(address)
        .await
        .map_err(|source| ListenerError::Bind {
            address: address.to_string(),
            source,
        })?;

    if let Ok(local_addr) = listener.local_addr() {
        tracing::info!(address = %local_addr, "Listener bound");
    }

    Ok(listener)
}
