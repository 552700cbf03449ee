//! Request preparation for forwarding.
//!
//! # Responsibilities
//! - Strip hop-by-hop headers from the inbound request
//! - Append the peer host to X-Forwarded-For
//! - Build a fresh outbound request from the structured parts
//!
//! # Design Decisions
//! - The outbound request never reuses inbound request-line state or
//!   extensions; only method, target URI, headers and body cross over
//! - The body is moved, not buffered
//! - Peer address failures only cost the X-Forwarded-For entry

use axum::body::Body;
use axum::http::{Request, Uri, Version};

use crate::error::RelayError;
use crate::net::peer::client_ip;
use crate::security::headers::{set_forwarded_for, strip_hop_by_hop};

/// Turn an inbound request into the request sent to the origin.
///
/// `remote_addr` is the peer in `host:port` form, when the transport knows it.
pub fn prepare_outbound(
    request: Request<Body>,
    remote_addr: Option<&str>,
) -> Result<Request<Body>, RelayError> {
    let (mut parts, body) = request.into_parts();

    strip_hop_by_hop(&mut parts.headers);
    record_forwarded_for(&mut parts.headers, remote_addr);

    let target = absolute_target(&parts.uri)?;

    let mut outbound = Request::new(body);
    *outbound.method_mut() = parts.method;
    *outbound.uri_mut() = target;
    *outbound.version_mut() = Version::HTTP_11;
    *outbound.headers_mut() = parts.headers;

    Ok(outbound)
}

fn record_forwarded_for(headers: &mut axum::http::HeaderMap, remote_addr: Option<&str>) {
    let Some(remote_addr) = remote_addr else {
        tracing::debug!("No peer address, skipping X-Forwarded-For");
        return;
    };

    let client = match client_ip(remote_addr) {
        Ok(client) => client,
        Err(e) => {
            tracing::debug!(error = %e, "Unparsable peer address, skipping X-Forwarded-For");
            return;
        }
    };

    if let Err(e) = set_forwarded_for(headers, client) {
        tracing::debug!(client = %client, error = %e, "Peer host not encodable, skipping X-Forwarded-For");
    }
}

/// The origin a request targets, as encoded in its own URI.
fn absolute_target(uri: &Uri) -> Result<Uri, RelayError> {
    if uri.scheme().is_some() && uri.authority().is_some() {
        Ok(uri.clone())
    } else {
        Err(RelayError::MissingTarget(uri.to_string()))
    }
}
