//! Per-request relay errors.
//!
//! Every variant ends the same way for the client: HTTP 500 with a fixed
//! body. The variants exist so the log line carries the real cause.

use std::error::Error as StdError;
use std::fmt::Write;

use hyper_util::client::legacy::Error as ClientError;

/// Failure to obtain a response from the origin.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// The request carries no absolute target to forward to.
    #[error("request target {0} is not an absolute URI")]
    MissingTarget(String),

    /// The upstream client could not complete the exchange.
    #[error("upstream request failed")]
    Upstream(#[from] ClientError),
}

impl RelayError {
    /// Full cause chain, e.g.
    /// `upstream request failed: client error (Connect): tcp connect error: Connection refused`.
    pub fn detail(&self) -> String {
        error_chain(self)
    }
}

/// Render an error and every `source()` below it, joined with `": "`.
pub fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let _ = write!(rendered, ": {}", cause);
        source = cause.source();
    }
    rendered
}
