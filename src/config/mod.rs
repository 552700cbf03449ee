//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! command line (--addr)
//!     → cli.rs (parse flags)
//!     → ProxyConfig (immutable)
//!     → net::listener binds, HttpServer consumes
//! ```
//!
//! # Design Decisions
//! - Config is immutable once built; no reload
//! - All fields have defaults so the proxy starts with no flags

pub mod schema;

pub use schema::ListenerConfig;
pub use schema::ProxyConfig;
pub use schema::DEFAULT_BIND_ADDRESS;
