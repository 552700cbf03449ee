//! Transparent HTTP forward proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────┐
//!                     │                FORWARD PROXY                 │
//!   Client Request    │  ┌─────────┐   ┌──────────┐   ┌───────────┐  │
//!   ──────────────────┼─▶│   net   │──▶│   http   │──▶│  request  │  │
//!                     │  │listener │   │  server  │   │ strip/XFF │  │
//!                     │  └─────────┘   └──────────┘   └─────┬─────┘  │
//!                     │                                     ▼        │
//!   Client Response   │  ┌──────────┐                ┌───────────┐   │
//!   ◀─────────────────┼──│ response │◀───────────────│ upstream  │◀──┼── Origin
//!                     │  │strip/copy│                │  client   │   │
//!                     │  └──────────┘                └───────────┘   │
//!                     └──────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod net;
pub mod observability;
pub mod security;

pub use config::schema::ProxyConfig;
pub use error::RelayError;
pub use http::HttpServer;
