//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → headers.rs (strip hop-by-hop, add X-Forwarded-For)
//!     → Forward to origin
//!
//! Origin response:
//!     → headers.rs (strip hop-by-hop, copy the rest)
//!     → Send to client
//! ```
//!
//! # Design Decisions
//! - Connection-scoped headers never leak between the two connections
//! - Client provenance is appended, never replaced

pub mod headers;
