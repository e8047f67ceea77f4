//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request path produces:
//!     → tower-http TraceLayer spans (method, uri, version, request id)
//!     → logging.rs subscriber (pretty or JSON lines)
//!     → metrics.rs (request counter, latency histogram)
//!
//! Consumers:
//!     → stdout log aggregation
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every span
//! - Metrics are cheap (atomic increments)

pub mod logging;
pub mod metrics;
