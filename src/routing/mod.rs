//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! RequestHead (method, target, version)
//!     → router.rs (malformed check, OPTIONS short-circuit, table lookup)
//!     → matcher.rs (segment-wise pattern match, id extraction)
//!     → handlers.rs (query → filter → paginate, lookup, stats)
//!     → Dispatch { ApiReply, route label }
//! ```
//!
//! # Design Decisions
//! - Route table is declared once and is immutable at runtime
//! - No regex in hot path
//! - Deterministic: same input always matches same route
//! - First match wins (table order)

pub mod handlers;
pub mod matcher;
pub mod router;

pub use matcher::RoutePattern;
pub use router::{ApiRouter, Dispatch, Endpoint, RequestHead, RouteEntry};
