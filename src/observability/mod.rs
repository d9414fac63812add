//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Edge middleware and handlers produce:
//!     → logging.rs (structured log events, one per routing decision)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request ID flows through every log line via the trace span
//! - Diagnostics never influence routing

pub mod logging;
pub mod metrics;
