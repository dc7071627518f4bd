use crate::error::ApiError;
use crate::server::AppState;
use agentsync_core::sync::models::{SyncReport, SyncRun};
use agentsync_core::{Pacer, SyncJob};
use agentsync_integrations::{HttpAgentFeed, HubSpotClient};
use axum::extract::Query;
use axum::routing::get;
use axum::{Extension, Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct SyncParams {
    /// `dry=1` selects dry-run mode; anything else is a real run.
    pub dry: Option<String>,
}

impl SyncParams {
    pub fn dry_run(&self) -> bool {
        self.dry.as_deref() == Some("1")
    }
}

#[derive(Debug, Serialize)]
pub struct SyncStatusResponse {
    pub last_run: Option<SyncRun>,
}

#[tracing::instrument(level = "debug", skip_all)]
pub fn router() -> Router {
    Router::new()
        .route("/sync", get(run_sync).post(run_sync))
        .route("/sync/status", get(get_status))
}

#[tracing::instrument(level = "info", skip_all, fields(dry_run))]
pub async fn run_sync(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<SyncParams>,
) -> Result<Json<SyncReport>, ApiError> {
    let dry_run = params.dry_run();
    tracing::Span::current().record("dry_run", dry_run);

    // Configuration is validated before any network call.
    let cfg = state.config.require()?;

    // One run at a time; overlapping triggers wait their turn.
    let _guard = state.run_lock.lock().await;

    let mut run = SyncRun::new_running(dry_run, Utc::now());
    *state.last_run.write().await = Some(run.clone());

    let feed = HttpAgentFeed::new(cfg.feed_url.clone())?;
    let crm = HubSpotClient::new(cfg.crm_base_url.clone(), cfg.hubspot_token.clone())?;
    let job = SyncJob::new(
        Arc::new(feed),
        Arc::new(crm),
        cfg.agent_object_type.clone(),
        Pacer::new(cfg.pacing),
    );

    match job.run(dry_run).await {
        Ok(report) => {
            run.finish_succeeded(&report, Utc::now());
            *state.last_run.write().await = Some(run);
            Ok(Json(report))
        }
        Err(e) => {
            run.finish_failed(&e, Utc::now());
            *state.last_run.write().await = Some(run);
            Err(e.into())
        }
    }
}

#[tracing::instrument(level = "debug", skip_all)]
pub async fn get_status(
    Extension(state): Extension<Arc<AppState>>,
) -> Json<SyncStatusResponse> {
    let last_run = state.last_run.read().await.clone();
    Json(SyncStatusResponse { last_run })
}
