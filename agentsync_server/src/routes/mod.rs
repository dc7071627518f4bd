use axum::routing::get;
use axum::Router;

pub mod diag;
pub mod health;
pub mod sync;

#[tracing::instrument(level = "debug", skip_all)]
pub fn router() -> Router {
    Router::new().nest(
        "/api/v1",
        Router::new()
            .route("/health", get(health::get_health))
            .merge(sync::router())
            .merge(diag::router()),
    )
}
