//! HTTP/2 JSON API server library.

// Domain
pub mod catalog;
pub mod collection;
pub mod query;

// Request handling
pub mod http;
pub mod net;
pub mod routing;

// Cross-cutting concerns
pub mod config;
pub mod lifecycle;
pub mod observability;

pub use catalog::Catalog;
pub use config::ServerConfig;
pub use http::ApiServer;
pub use lifecycle::Shutdown;
pub use routing::ApiRouter;
