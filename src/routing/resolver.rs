//! Subdomain resolution.
//!
//! # Responsibilities
//! - Decide whether a hostname addresses a tenant subdomain
//! - Pick the label-counting rule from the deployment mode
//!
//! # Design Decisions
//! - Pure function of (hostname, mode): no lookups, no caching
//! - The mode is explicit configuration; the `localhost` token is only the
//!   fallback used to infer it when unset
//! - Label counting, not root-domain comparison: `co.uk`-style public
//!   suffixes are misread as tenants (known limitation)
//! - Labels are taken verbatim (no case folding)

use std::fmt;

use serde::{Deserialize, Serialize};

/// Label that never names a tenant.
const WWW: &str = "www";

/// Token marking a local development host.
const LOCALHOST: &str = "localhost";

/// Which label-counting rule applies to a hostname.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentMode {
    /// `tenant.localhost`: two labels are enough for a subdomain.
    Local,
    /// `tenant.example.com`: three or more labels are required.
    Production,
}

impl DeploymentMode {
    /// Infer the mode from the literal `localhost` token.
    pub fn infer(hostname: &str) -> Self {
        if hostname.contains(LOCALHOST) {
            DeploymentMode::Local
        } else {
            DeploymentMode::Production
        }
    }
}

impl fmt::Display for DeploymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeploymentMode::Local => f.write_str("local"),
            DeploymentMode::Production => f.write_str("production"),
        }
    }
}

/// A tenant identifier: the leftmost DNS label of the request host.
///
/// Never validated against a registry. Downstream handlers receive it as a
/// plain string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Subdomain(String);

impl Subdomain {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Subdomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Subdomain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Resolve the tenant subdomain of `hostname` under the given mode.
pub fn resolve_subdomain(hostname: &str, mode: DeploymentMode) -> Option<Subdomain> {
    let labels: Vec<&str> = hostname.split('.').collect();
    let first = labels[0];

    let accepted = match mode {
        DeploymentMode::Local => labels.len() >= 2 && first != LOCALHOST && first != WWW,
        // Two labels or fewer is a bare root domain.
        DeploymentMode::Production => labels.len() >= 3 && first != WWW,
    };

    // An empty leftmost label (".localhost") is not a tenant.
    if accepted && !first.is_empty() {
        Some(Subdomain(first.to_string()))
    } else {
        None
    }
}

/// Outcome of resolving one Host header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub hostname: String,
    pub mode: DeploymentMode,
    pub subdomain: Option<Subdomain>,
}

/// Host resolver with an optional fixed deployment mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostResolver {
    mode: Option<DeploymentMode>,
}

impl HostResolver {
    /// Create a resolver. `None` infers the mode per request.
    pub fn new(mode: Option<DeploymentMode>) -> Self {
        Self { mode }
    }

    /// The configured mode, or the one inferred from `hostname`.
    pub fn mode_for(&self, hostname: &str) -> DeploymentMode {
        self.mode.unwrap_or_else(|| DeploymentMode::infer(hostname))
    }

    /// Resolve a raw Host header value (port allowed, may be empty).
    pub fn resolve(&self, host_header: &str) -> Resolution {
        let hostname = super::host::hostname_from_header(host_header);
        let mode = self.mode_for(hostname);

        Resolution {
            hostname: hostname.to_string(),
            mode,
            subdomain: resolve_subdomain(hostname, mode),
        }
    }
}
