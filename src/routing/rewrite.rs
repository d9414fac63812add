//! Tenant path rewriting.
//!
//! The rewritten path is an internal dispatch key only. It is never sent
//! back to the client as a redirect or a header.

use std::str::FromStr;

use axum::http::uri::{InvalidUriParts, PathAndQuery, Uri};
use thiserror::Error;

use super::resolver::Subdomain;

/// Fixed namespace that tenant routes live under.
pub const TENANT_PREFIX: &str = "/tenant";

/// The rewritten URI could not be represented.
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("invalid tenant path {path:?}: {source}")]
    Path {
        path: String,
        #[source]
        source: axum::http::uri::InvalidUri,
    },
    #[error("invalid rewritten uri: {0}")]
    Parts(#[from] InvalidUriParts),
    /// The label would change meaning inside a path segment.
    #[error("subdomain {0:?} is not a safe path segment")]
    UnsafeLabel(String),
    #[error("rewritten path {actual:?} does not match {expected:?}")]
    Mismatch { expected: String, actual: String },
}

/// Characters that end, split or re-encode a path segment.
const SEGMENT_BREAKERS: &[char] = &['?', '#', '/', '%'];

/// `/tenant/{subdomain}{path}`.
pub fn tenant_path(subdomain: &Subdomain, path: &str) -> String {
    format!("{TENANT_PREFIX}/{subdomain}{path}")
}

/// Recover the original path from a tenant path for `subdomain`.
pub fn strip_tenant_prefix<'a>(effective: &'a str, subdomain: &Subdomain) -> Option<&'a str> {
    effective
        .strip_prefix(TENANT_PREFIX)?
        .strip_prefix('/')?
        .strip_prefix(subdomain.as_str())
        .filter(|rest| rest.starts_with('/'))
}

/// Rewrite the path of `uri` into the tenant namespace, keeping the query.
///
/// Fails rather than produce a URI whose path is not exactly
/// `/tenant/{subdomain}{path}`.
pub fn rewrite_uri(uri: &Uri, subdomain: &Subdomain) -> Result<Uri, RewriteError> {
    if subdomain.as_str().contains(SEGMENT_BREAKERS) {
        return Err(RewriteError::UnsafeLabel(subdomain.to_string()));
    }

    let expected = tenant_path(subdomain, uri.path());
    let mut path = expected.clone();
    if let Some(query) = uri.query() {
        path.push('?');
        path.push_str(query);
    }

    let path_and_query = PathAndQuery::from_str(&path)
        .map_err(|source| RewriteError::Path { path: path.clone(), source })?;
    if path_and_query.path() != expected || path_and_query.query() != uri.query() {
        return Err(RewriteError::Mismatch {
            expected,
            actual: path_and_query.to_string(),
        });
    }

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(path_and_query);
    Ok(Uri::from_parts(parts)?)
}
