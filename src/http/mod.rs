//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (one task per connection)
//!     → server.rs (Axum setup, catch-all relay route)
//!     → request.rs (strip hop-by-hop, X-Forwarded-For, fresh outbound request)
//!     → hyper-util client → origin
//!     → response.rs (strip hop-by-hop, copy headers, stream body)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use response::{RelayBody, PROXY_ERROR_BODY};
pub use server::{relay, AppState, HttpServer, UpstreamClient};
