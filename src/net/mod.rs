//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! --addr host:port
//!     → listener.rs (resolve & bind)
//!     → Hand off to HTTP layer (one task per connection)
//!
//! Accepted connection
//!     → peer address "host:port"
//!     → peer.rs (split host/port for X-Forwarded-For)
//! ```

pub mod listener;
pub mod peer;

pub use listener::{bind, ListenerError};
pub use peer::{client_ip, split_host_port, AddrError};
