//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → tls.rs (optional TLS handshake, ALPN h2 / http/1.1)
//!     → axum-server connection (HTTP/1.1 or HTTP/2)
//!     → Hand off to HTTP layer
//! ```
//!
//! # Design Decisions
//! - TLS is optional and handled transparently
//! - Plaintext listeners still accept HTTP/2 with prior knowledge

pub mod tls;

pub use tls::{load_tls_config, TlsError};
