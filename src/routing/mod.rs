//! Routing subsystem: host-to-tenant resolution.
//!
//! # Data Flow
//! ```text
//! Incoming Request (Host header, path)
//!     → bypass.rs (infrastructure prefixes short-circuit)
//!     → host.rs (strip :port)
//!     → resolver.rs (leftmost label → Option<Subdomain>)
//!     → rewrite.rs (/tenant/{subdomain}{path})
//!     → router.rs (RouteDecision for the edge middleware)
//! ```
//!
//! # Design Decisions
//! - Policy compiled from config, immutable at runtime (swapped whole on reload)
//! - Deterministic: same host and path always yield the same decision
//! - Never fails: malformed input routes to the root domain

pub mod bypass;
pub mod host;
pub mod resolver;
pub mod rewrite;
pub mod router;

pub use bypass::{BypassSet, PathPrefixMatcher, DEFAULT_BYPASS_PREFIXES};
pub use resolver::{resolve_subdomain, DeploymentMode, HostResolver, Resolution, Subdomain};
pub use rewrite::{rewrite_uri, strip_tenant_prefix, tenant_path, RewriteError, TENANT_PREFIX};
pub use router::{RouteDecision, TenantRouter};
