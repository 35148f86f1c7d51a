//! HTTP API layer: producer and system route handlers, DTOs, OpenAPI.

pub mod dto;
pub mod handlers;

use axum::Router;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI document for the HTTP endpoints.
///
/// The `/output` WebSocket endpoint is not described here.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "plug-relay", description = "Plug state change relay"),
    paths(handlers::input::input_handler, handlers::system::health_handler),
    tags(
        (name = "Producer", description = "Publish plug state changes"),
        (name = "System", description = "Service status"),
    )
)]
pub struct ApiDoc;

/// Builds the HTTP router with all producer and system endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .merge(handlers::input::routes())
        .merge(handlers::system::routes())
}
