//! HTTP surface for the files-manager store clients
//!
//! - `GET /status`: advisory liveness of both stores
//! - `GET /stats`: user and file counts from the document store

pub mod config;
pub mod routes;
pub mod shutdown;
pub mod state;

use axum::Router;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub use state::AppState;

/// Build the application router over the given state
pub fn app(state: AppState) -> Router {
    routes::router(state).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    )
}
