//! Topology endpoint
//!
//! `GET /api/v1/topology?cidr=10.0.0.0/16&format=table&azs=3`
//!
//! Success returns the rendered artifact with the format's content type;
//! every validation failure returns 400 with a JSON error body.

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use ipnetwork::Ipv4Network;
use serde::Deserialize;
use std::sync::Arc;
use vpc_render::Format;

use crate::models::ErrorResponse;
use crate::ApiState;

/// Query parameters for a topology request
#[derive(Debug, Deserialize)]
pub struct TopologyQuery {
    /// CIDR block to partition
    pub cidr: Option<String>,
    /// Output format name
    pub format: Option<String>,
    /// Zone count; falls back to the server default
    pub azs: Option<u32>,
}

/// Compute and render a topology
pub async fn get_topology(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<TopologyQuery>,
) -> Response {
    let Some(cidr) = query.cidr.as_deref() else {
        return ErrorResponse::new("missing_parameter", "parameter cidr cannot be empty")
            .into_response();
    };
    let Some(format) = query.format.as_deref() else {
        return ErrorResponse::new("missing_parameter", "parameter format cannot be empty")
            .into_response();
    };

    let root = match cidr.parse::<Ipv4Network>() {
        Ok(root) => root,
        Err(e) => return ErrorResponse::new("invalid_cidr", e.to_string()).into_response(),
    };
    let format = match format.parse::<Format>() {
        Ok(format) => format,
        Err(e) => return ErrorResponse::new("unknown_format", e.to_string()).into_response(),
    };
    let azs = query.azs.unwrap_or(state.default_azs);

    match vpc_subnet::allocate(root, azs) {
        Ok(topology) => (
            [(header::CONTENT_TYPE, format.content_type())],
            format.render(&topology),
        )
            .into_response(),
        Err(err) => ErrorResponse::from(&err).into_response(),
    }
}
