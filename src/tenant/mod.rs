//! Tenant-facing application behind the edge.
//!
//! # Data Flow
//! ```text
//! Rewritten request (/tenant/{subdomain}/...)
//!     → pages.rs (path parameter → JSON view)
//!     → stats.rs (home and dashboard numbers via TenantStatsProvider)
//!     → links.rs (client-facing tenant URLs on the landing page)
//! ```

pub mod links;
pub mod pages;
pub mod stats;

pub use stats::{FixedStatsProvider, HomeSummary, RandomStatsProvider, TenantStats, TenantStatsProvider};
