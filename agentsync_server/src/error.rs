use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Error body mirrored to callers: `{"ok": false, "error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub ok: bool,
    pub error: String,
}

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] agentsync_core::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Every sync failure (configuration, feed, CRM) surfaces as a 500
        // with the stringified error; callers see either a full summary or
        // one opaque error string.
        let body = ErrorBody {
            ok: false,
            error: self.to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
