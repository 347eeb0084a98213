//! VPCBlocks HTTP API
//!
//! Thin HTTP front end over the core partitioner: one endpoint computes a
//! topology from query parameters and returns the rendered artifact.
//! Requests are independent; there is no shared mutable state.

#![warn(missing_docs)]

pub mod models;
pub mod routes;

use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use models::*;

/// API state
#[derive(Clone)]
pub struct ApiState {
    /// Zone count applied when a request omits `azs`
    pub default_azs: u32,
}

impl Default for ApiState {
    fn default() -> Self {
        Self { default_azs: 4 }
    }
}

/// Build the API router
pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

fn api_routes() -> Router<Arc<ApiState>> {
    Router::new().route("/topology", get(routes::topology::get_topology))
}
