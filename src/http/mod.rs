//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, layers)
//!     → request.rs (add request ID)
//!     → middleware/tenant_rewrite.rs (bypass check, host resolution, URI rewrite)
//!     → application router (tenant pages, landing, health)
//!     → Send to client (original URL untouched)
//! ```

pub mod middleware;
pub mod request;
pub mod server;

pub use middleware::ResolvedTenant;
pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer, SharedPolicy};
