//! API server builder and router

use axum::Router;
use produce::Registry;

use crate::error::MarketError;

/// Market builder for configuring and creating the produce API service
#[derive(Debug, Default)]
pub struct MarketBuilder {
    registry: Option<Registry>,
}

impl MarketBuilder {
    /// Create a new market builder
    pub fn new() -> Self {
        Self { registry: None }
    }

    /// Set the registry which backs the API.
    ///
    /// Pass a clone of a registry to keep a handle for inspecting it
    /// outside of the service. Without one, the service gets its own
    /// empty registry.
    pub fn registry(mut self, registry: Registry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Build the market service
    ///
    /// Returns a Router that can be served with any tower-compatible server
    pub fn build(self) -> Router {
        let registry = self.registry.unwrap_or_default();

        Router::new()
            .merge(crate::entries::router())
            .fallback(page_not_found)
            .with_state(registry)
    }
}

/// Fallback for unknown paths
async fn page_not_found() -> MarketError {
    MarketError::PageNotFound
}
