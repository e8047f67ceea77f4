//! Query processing subsystem.
//!
//! # Data Flow
//! ```text
//! request target "/api/products?minPrice=100&page=2"
//!     → params.rs (split on first '?', split pairs, percent-decode)
//!     → QueryParams (name → value, last occurrence wins)
//!     → options.rs (typed per-resource options, fail closed)
//!     → collection filter + paginator
//! ```
//!
//! # Design Decisions
//! - Pairs with an empty key or value are dropped, not errors
//! - Numeric parameters are validated once, here; downstream code
//!   only ever sees `NonZeroUsize` page/limit and finite prices

pub mod options;
pub mod params;

pub use options::{PageRequest, PostQuery, ProductQuery, UserQuery};
pub use params::{split_target, QueryParams};

/// Reasons a query string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("malformed percent-encoding in {0:?}")]
    MalformedEscape(String),

    #[error("{0} must be a positive integer")]
    NotPositiveInteger(&'static str),

    #[error("{0} must be a finite number")]
    NotFiniteNumber(&'static str),
}
