use std::{convert::Infallible, sync::Arc, time::Duration};

use axum::{
    extract::State,
    response::sse::{Event as SseEvent, KeepAlive, Sse},
    routing::get,
    Json, Router,
};
use futures::stream::{Stream, StreamExt};
use goalwise_core::{
    dashboard::{DashboardOrchestrator, DashboardSnapshot},
    summary::GoalsSummary,
    utils::time_utils::today_utc,
};
use tokio_stream::wrappers::{errors::BroadcastStreamRecvError, BroadcastStream};

use crate::{auth::CurrentUser, error::ApiResult, main_lib::AppState};

pub const DASHBOARD_EVENT: &str = "dashboard";

#[utoipa::path(get, path = "/api/v1/summary", responses((status = 200, description = "Aggregate totals")))]
pub async fn get_summary(
    CurrentUser(user): CurrentUser,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<GoalsSummary>> {
    let summary = state.dashboard_service.summary(&user)?;
    Ok(Json(summary))
}

#[utoipa::path(get, path = "/api/v1/dashboard", responses((status = 200, description = "Dashboard snapshot")))]
pub async fn get_dashboard(
    CurrentUser(user): CurrentUser,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<DashboardSnapshot>> {
    let snapshot = state.dashboard_service.snapshot(&user, today_utc())?;
    Ok(Json(snapshot))
}

#[utoipa::path(get, path = "/api/v1/dashboard/stream", responses((status = 200, description = "Server-sent dashboard snapshots")))]
pub async fn stream_dashboard(
    CurrentUser(user): CurrentUser,
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<SseEvent, Infallible>>> {
    // Subscribe before the initial snapshot is taken so no change falls in between.
    let receiver = BroadcastStream::new(state.event_bus.subscribe());
    let changes = tokio_stream::StreamExt::filter_map(receiver, |event| match event {
        Ok(evt) => Some(evt),
        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
            tracing::warn!("Dashboard stream lagged, {} events skipped", skipped);
            None
        }
    });

    let orchestrator = Arc::new(DashboardOrchestrator::new(
        state.dashboard_service.clone(),
        user,
    ));
    // Refetches hit SQLite, so they run on the blocking pool.
    let stream = orchestrator
        .invalidations(changes)
        .then(move |_| {
            let orchestrator = Arc::clone(&orchestrator);
            async move {
                tokio::task::spawn_blocking(move || orchestrator.refresh_or_skip())
                    .await
                    .unwrap_or_else(|e| {
                        tracing::error!("Dashboard refresh task failed: {}", e);
                        None
                    })
            }
        })
        .filter_map(|snapshot| async move {
            let snapshot = snapshot?;
            match SseEvent::default().event(DASHBOARD_EVENT).json_data(&snapshot) {
                Ok(ev) => Some(Ok(ev)),
                Err(e) => {
                    tracing::warn!("Failed to encode dashboard snapshot: {}", e);
                    None
                }
            }
        });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/summary", get(get_summary))
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/stream", get(stream_dashboard))
}
