//! Collection processing: filtering, pagination and aggregation.
//!
//! # Data Flow
//! ```text
//! &[Record] (full collection, insertion order)
//!     → filter.rs (AND of the predicates present in the typed query)
//!     → Vec<&Record> (order preserved)
//!     → paginate.rs (window slice + total / totalPages)
//!
//! &Catalog
//!     → aggregate.rs (counts, mean price, stock sum)
//! ```
//!
//! # Design Decisions
//! - Every function here is pure; no shared state is touched
//! - Absent predicates match everything (empty query = identity)
//! - Out-of-range pages yield an empty slice, never an error

pub mod aggregate;
pub mod filter;
pub mod paginate;

pub use aggregate::Stats;
pub use filter::{filter, RecordFilter};
pub use paginate::{paginate, Paginated};
