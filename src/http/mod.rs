//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, request id, tracing, concurrency limit)
//!     → routing::ApiRouter (pure dispatch to an ApiReply)
//!     → response.rs (JSON body, CORS and no-cache headers)
//!     → Send to client
//! ```
//!
//! Errors (`error.rs`) are encoded where they are detected and take the
//! same path through `response.rs` as successful replies.

pub mod error;
pub mod protocol;
pub mod response;
pub mod server;

pub use error::ApiError;
pub use protocol::ProtocolInfo;
pub use response::ApiReply;
pub use server::{ApiServer, ServerError};
