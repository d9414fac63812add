//! Subdomain multi-tenancy at the HTTP edge.
//!
//! Maps the Host header of each request to a tenant and rewrites the path
//! to `/tenant/{subdomain}/...` before route dispatch, without the client
//! ever seeing the rewritten path.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod tenant;

pub use config::schema::TenantConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{RouteDecision, TenantRouter};
