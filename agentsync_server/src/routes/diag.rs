use crate::server::AppState;
use agentsync_core::config::ConfigPresence;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde::Serialize;
use std::sync::Arc;

/// Configuration presence report. Secret values never leave the process.
#[derive(Debug, Serialize)]
pub struct DiagResponse {
    pub ok: bool,
    #[serde(flatten)]
    pub config: ConfigPresence,
}

#[tracing::instrument(level = "debug", skip_all)]
pub fn router() -> Router {
    Router::new().route("/diag", get(get_diag))
}

#[tracing::instrument(level = "debug", skip_all)]
pub async fn get_diag(Extension(state): Extension<Arc<AppState>>) -> Json<DiagResponse> {
    Json(DiagResponse {
        ok: true,
        config: state.config.presence(),
    })
}
