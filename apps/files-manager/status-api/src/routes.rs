use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use serde_json::json;
use tracing::warn;

use crate::state::AppState;
use storage::StoreError;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct StatusResponse {
    pub redis: bool,
    pub db: bool,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct StatsResponse {
    pub users: u64,
    pub files: u64,
}

/// A store failure surfaced to HTTP callers as 503
#[derive(Debug)]
pub struct ApiError(StoreError);

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!(error = %self.0, "Store request failed");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": self.0.to_string() })),
        )
            .into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/status", get(status))
        .route("/stats", get(stats))
        .with_state(state)
}

/// Last observed liveness of each store. Never touches the network.
async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        redis: state.clients.key_value.is_alive(),
        db: state.clients.documents.is_alive(),
    })
}

async fn stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, ApiError> {
    let documents = &state.clients.documents;
    let (users, files) = tokio::try_join!(documents.count_users(), documents.count_files())?;

    Ok(Json(StatsResponse { users, files }))
}
