//! # plug-relay
//!
//! Relays plug state changes from HTTP producers to WebSocket consumers.
//!
//! A producer calls `/input?plug=<0-4>&state=<0|1>`; the request is
//! validated into a [`domain::PlugEvent`] and published on the
//! [`domain::EventBus`], which fans it out to every session connected on
//! `/output`. Each session writes `{"Plug": <int>, "State": <bool>}` as a
//! text frame.
//!
//! ## Architecture
//!
//! ```text
//! Producers (HTTP)            Consumers (WebSocket)
//!     │                              ▲
//!     ├── Input Handler (api/)       ├── Subscriber Session (ws/)
//!     ├── Validator (domain/)        │
//!     │                              │
//!     └──────► EventBus (domain/) ───┘
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod ws;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::ws::handler::output_handler;

/// Builds the complete relay router: producer, consumer, and system routes.
pub fn router(state: AppState) -> Router {
    let app = Router::new()
        .merge(api::build_router())
        .route("/output", get(output_handler));

    #[cfg(feature = "swagger-ui")]
    let app = {
        use utoipa::OpenApi;
        app.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", api::ApiDoc::openapi()),
        )
    };

    app.layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
