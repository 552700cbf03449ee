//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! startup banner, request line, dispatch errors,
//! origin status, body copy errors
//!     → tracing events with structured fields
//!     → logging.rs (fmt subscriber on stderr)
//! ```

pub mod logging;
