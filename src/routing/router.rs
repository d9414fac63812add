//! Per-request routing decision.
//!
//! # Responsibilities
//! - Hold the compiled routing policy (bypass set, resolver, root domain)
//! - Turn (Host header, path) into a `RouteDecision`
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Bypass is checked first and short-circuits resolution
//! - No error outcome: anything unexpected routes to the root domain

use serde::Serialize;

use crate::config::RoutingConfig;
use crate::routing::bypass::BypassSet;
use crate::routing::host::hostname_from_header;
use crate::routing::resolver::{DeploymentMode, HostResolver, Subdomain};
use crate::routing::rewrite::tenant_path;

/// Where a request goes after the pre-routing filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum RouteDecision {
    /// Infrastructure path, forwarded untouched.
    Bypass { prefix: String },
    /// No subdomain: normal root-domain routing.
    Root { hostname: String, mode: DeploymentMode },
    /// Tenant subdomain: dispatch on the tenant-scoped path.
    Tenant {
        hostname: String,
        mode: DeploymentMode,
        subdomain: Subdomain,
        effective_path: String,
    },
}

impl RouteDecision {
    /// The path used for internal dispatch.
    pub fn effective_path<'a>(&'a self, original: &'a str) -> &'a str {
        match self {
            RouteDecision::Tenant { effective_path, .. } => effective_path,
            RouteDecision::Bypass { .. } | RouteDecision::Root { .. } => original,
        }
    }

    pub fn subdomain(&self) -> Option<&Subdomain> {
        match self {
            RouteDecision::Tenant { subdomain, .. } => Some(subdomain),
            _ => None,
        }
    }

    /// Short label used in logs and metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            RouteDecision::Bypass { .. } => "bypass",
            RouteDecision::Root { .. } => "root",
            RouteDecision::Tenant { .. } => "tenant",
        }
    }
}

/// Compiled routing policy.
#[derive(Debug, Clone)]
pub struct TenantRouter {
    bypass: BypassSet,
    resolver: HostResolver,
    root_domain: String,
}

impl TenantRouter {
    pub fn new(bypass: BypassSet, resolver: HostResolver, root_domain: impl Into<String>) -> Self {
        Self {
            bypass,
            resolver,
            root_domain: root_domain.into(),
        }
    }

    /// Build the policy from configuration.
    pub fn from_config(config: &RoutingConfig) -> Self {
        Self::new(
            BypassSet::new(config.bypass_prefixes.iter().cloned()),
            HostResolver::new(config.deployment_mode),
            config.root_domain.clone(),
        )
    }

    /// Root domain used for tenant link generation. Resolution ignores it.
    pub fn root_domain(&self) -> &str {
        &self.root_domain
    }

    /// Deployment mode that applies to a request with this Host header.
    pub fn mode_for(&self, host_header: &str) -> DeploymentMode {
        self.resolver.mode_for(hostname_from_header(host_header))
    }

    /// Decide how to route a request. A missing Host header is `None`.
    pub fn decide(&self, host: Option<&str>, path: &str) -> RouteDecision {
        if let Some(matcher) = self.bypass.matching(path) {
            return RouteDecision::Bypass {
                prefix: matcher.prefix().to_string(),
            };
        }

        let resolution = self.resolver.resolve(host.unwrap_or_default());
        match resolution.subdomain {
            Some(subdomain) => RouteDecision::Tenant {
                effective_path: tenant_path(&subdomain, path),
                hostname: resolution.hostname,
                mode: resolution.mode,
                subdomain,
            },
            None => RouteDecision::Root {
                hostname: resolution.hostname,
                mode: resolution.mode,
            },
        }
    }
}

impl Default for TenantRouter {
    fn default() -> Self {
        Self::from_config(&RoutingConfig::default())
    }
}
