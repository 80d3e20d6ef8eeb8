//! HTTP application wiring (Axum router + shared state).
//!
//! - `state.rs`: store, snapshot writer, templates
//! - `routes/`: JSON endpoints per document type, plus the HTML pages
//! - `dto.rs`: list/detail JSON shapes
//! - `errors.rs`: the `{success: false, message}` envelope

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub mod dto;
pub mod errors;
pub mod forms;
pub mod routes;
pub mod state;
pub mod templates;

pub use state::{AppState, StartupError};

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api", routes::api_router())
        .merge(routes::pages::router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(Extension(Arc::new(state))),
        )
}
