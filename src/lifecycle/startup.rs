//! Startup orchestration.
//!
//! # Responsibilities
//! - Load the record catalog (seed file or built-in data)
//! - Bind the listening socket
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listeners start last (traffic only when ready)

use std::net::TcpListener;

use crate::catalog::{seed, Catalog, CatalogError};
use crate::config::{DataConfig, ListenerConfig};

/// Build the catalog served for the whole process lifetime.
pub fn load_catalog(config: &DataConfig) -> Result<Catalog, CatalogError> {
    let catalog = match &config.seed_path {
        Some(path) => seed::load_seed_file(path)?,
        None => seed::reference(),
    };
    tracing::info!(
        users = catalog.users().len(),
        products = catalog.products().len(),
        posts = catalog.posts().len(),
        source = config
            .seed_path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in".to_string()),
        "Catalog loaded"
    );
    Ok(catalog)
}

/// Bind the configured address.
pub fn bind(config: &ListenerConfig) -> std::io::Result<TcpListener> {
    let listener = TcpListener::bind(&config.bind_address)?;
    tracing::info!(
        address = %listener.local_addr()?,
        tls = config.tls.is_some(),
        "Listener bound"
    );
    Ok(listener)
}
