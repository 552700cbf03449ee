//! Peer address parsing.
//!
//! # Responsibilities
//! - Split a `host:port` peer address into its parts
//! - Extract the client host used for `X-Forwarded-For`
//!
//! # Design Decisions
//! - Accepts the textual form, not `SocketAddr`, so any transport that can
//!   name its peer works
//! - Bracketed IPv6 (`[::1]:80`) is unwrapped; unbracketed IPv6 is rejected
//! - An empty port is allowed (`host:`), a missing port is not

/// Error returned when a peer address cannot be split.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddrError {
    #[error("address {0}: missing port in address")]
    MissingPort(String),

    #[error("address {0}: too many colons in address")]
    TooManyColons(String),

    #[error("address {0}: missing ']' in address")]
    MissingBracket(String),

    #[error("address {0}: unexpected '[' in address")]
    UnexpectedOpenBracket(String),

    #[error("address {0}: unexpected ']' in address")]
    UnexpectedCloseBracket(String),
}

/// Split `host:port` (or `[host]:port`) into host and port.
pub fn split_host_port(addr: &str) -> Result<(&str, &str), AddrError> {
    let last_colon = addr
        .rfind(':')
        .ok_or_else(|| AddrError::MissingPort(addr.to_string()))?;

    let (host, host_start, host_end) = if addr.starts_with('[') {
        let close = addr
            .find(']')
            .ok_or_else(|| AddrError::MissingBracket(addr.to_string()))?;

        // The closing bracket must be immediately followed by the port colon.
        match close + 1 {
            end if end == addr.len() => return Err(AddrError::MissingPort(addr.to_string())),
            end if end == last_colon => {}
            _ => {
                return Err(if addr.as_bytes()[close + 1] == b':' {
                    AddrError::TooManyColons(addr.to_string())
                } else {
                    AddrError::MissingPort(addr.to_string())
                });
            }
        }
        (&addr[1..close], 1, close + 1)
    } else {
        let host = &addr[..last_colon];
        if host.contains(':') {
            return Err(AddrError::TooManyColons(addr.to_string()));
        }
        (host, 0, 0)
    };

    if addr[host_start..].contains('[') {
        return Err(AddrError::UnexpectedOpenBracket(addr.to_string()));
    }
    if addr[host_end..].contains(']') {
        return Err(AddrError::UnexpectedCloseBracket(addr.to_string()));
    }

    Ok((host, &addr[last_colon + 1..]))
}

/// Host portion of a peer address, as recorded in `X-Forwarded-For`.
pub fn client_ip(remote_addr: &str) -> Result<&str, AddrError> {
    split_host_port(remote_addr).map(|(host, _)| host)
}
