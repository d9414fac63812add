//! Hostname extraction from the Host header.
//!
//! The header value is untrusted client input. Nothing here fails: a missing
//! or garbled header degrades to an empty hostname, which later resolves to
//! the root domain.

use axum::http::{header, HeaderMap, Request};

/// Strip any `:port` suffix from a raw Host header value.
///
/// Takes everything before the first `:`. IPv6 literals (`[::1]:3000`) are
/// not special-cased and reduce to `[`, which never resolves to a tenant.
pub fn hostname_from_header(raw: &str) -> &str {
    raw.split(':').next().unwrap_or_default()
}

/// The Host header, if present and visible ASCII.
pub fn host_header(headers: &HeaderMap) -> Option<&str> {
    headers.get(header::HOST).and_then(|h| h.to_str().ok())
}

/// Read the raw Host header, or `""` when absent or not visible ASCII.
pub fn raw_host(headers: &HeaderMap) -> &str {
    host_header(headers).unwrap_or_default()
}

/// Host of a request: the Host header, else the URI authority (HTTP/2).
pub fn request_host<B>(req: &Request<B>) -> Option<&str> {
    host_header(req.headers()).or_else(|| req.uri().authority().map(|a| a.as_str()))
}
