//! Header manipulation.
//!
//! # Responsibilities
//! - Strip hop-by-hop headers in both directions
//! - Append the client address to X-Forwarded-For
//! - Copy response headers without collapsing repeated keys
//!
//! # Design Decisions
//! - `HeaderMap` is the header multimap: case-insensitive keys, ordered values,
//!   `append` adds, `insert` replaces, `remove` deletes every value
//! - Prior X-Forwarded-For values are kept and folded into one header

use axum::http::header::{
    HeaderMap, HeaderName, HeaderValue, InvalidHeaderValue, CONNECTION, PROXY_AUTHENTICATE,
    PROXY_AUTHORIZATION, TE, TRAILER, TRANSFER_ENCODING, UPGRADE,
};

/// `X-Forwarded-For` header name.
pub const X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");

/// Non-standard, but still sent by libcurl.
const PROXY_CONNECTION: HeaderName = HeaderName::from_static("proxy-connection");

const KEEP_ALIVE: HeaderName = HeaderName::from_static("keep-alive");

/// Connection-scoped headers that never cross the proxy.
///
/// `Connection` in particular is removed so the client's wishes don't dictate
/// how the origin-facing connection is reused.
pub const HOP_BY_HOP_HEADERS: [HeaderName; 9] = [
    CONNECTION,
    PROXY_CONNECTION,
    KEEP_ALIVE,
    PROXY_AUTHENTICATE,
    PROXY_AUTHORIZATION,
    TE,
    // Not "Trailers": RFC 2616 errata 4522.
    TRAILER,
    TRANSFER_ENCODING,
    UPGRADE,
];

/// Remove every value of every hop-by-hop header.
pub fn strip_hop_by_hop(headers: &mut HeaderMap) {
    for name in &HOP_BY_HOP_HEADERS {
        headers.remove(name);
    }
}

/// Record `client_ip` in X-Forwarded-For.
///
/// Existing values are joined with `", "` and the new address appended, so a
/// chain of proxies accumulates into a single header.
pub fn set_forwarded_for(
    headers: &mut HeaderMap,
    client_ip: &str,
) -> Result<(), InvalidHeaderValue> {
    let prior: Vec<&[u8]> = headers
        .get_all(&X_FORWARDED_FOR)
        .iter()
        .map(HeaderValue::as_bytes)
        .collect();

    let mut chain = prior.join(&b", "[..]);
    if !prior.is_empty() {
        chain.extend_from_slice(b", ");
    }
    chain.extend_from_slice(client_ip.as_bytes());

    let value = HeaderValue::from_bytes(&chain)?;
    headers.insert(X_FORWARDED_FOR, value);
    Ok(())
}

/// Append every value of every header in `src` onto `dst`.
pub fn copy_headers(dst: &mut HeaderMap, src: &HeaderMap) {
    for (name, value) in src {
        dst.append(name, value.clone());
    }
}
