use crate::routes;
use agentsync_core::config::ConfigSnapshot;
use agentsync_core::sync::models::SyncRun;
use axum::routing::get;
use axum::{Extension, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{Mutex, RwLock};
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub struct AppState {
    pub config: ConfigSnapshot,
    /// Most recent sync run, kept in memory for the status route.
    pub last_run: RwLock<Option<SyncRun>>,
    /// Serializes sync runs so record processing never overlaps.
    pub run_lock: Mutex<()>,
    pub started_at: Instant,
}

impl AppState {
    #[tracing::instrument(level = "debug", skip(config))]
    pub fn new(config: ConfigSnapshot) -> Self {
        Self {
            config,
            last_run: RwLock::new(None),
            run_lock: Mutex::new(()),
            started_at: Instant::now(),
        }
    }
}

#[tracing::instrument(level = "debug", skip_all)]
pub fn router(state: AppState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .merge(routes::router())
        .route("/health", get(routes::health::get_health))
        .layer(Extension(state))
        .layer(SetRequestIdLayer::new(
            axum::http::HeaderName::from_static("x-request-id"),
            MakeRequestUuid,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

#[tracing::instrument(level = "info", skip_all)]
pub async fn serve(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "agentsync server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
