use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use goalwise_core::{goals::Goal, utils::time_utils::today_utc};

use super::models::{CreateGoalRequest, ParseGoalRequest};
use crate::{auth::CurrentUser, error::ApiResult, main_lib::AppState};

#[utoipa::path(get, path = "/api/v1/goals", responses((status = 200, description = "Goals, newest first")))]
pub async fn list_goals(
    CurrentUser(user): CurrentUser,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Goal>>> {
    let goals = state.goal_service.get_goals(&user)?;
    Ok(Json(goals))
}

#[utoipa::path(post, path = "/api/v1/goals", request_body = CreateGoalRequest, responses((status = 201, description = "Created goal"), (status = 400, description = "Invalid goal")))]
pub async fn create_goal(
    CurrentUser(user): CurrentUser,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateGoalRequest>,
) -> ApiResult<(StatusCode, Json<Goal>)> {
    let goal = state
        .goal_service
        .create_goal(&user, payload.into(), today_utc())
        .await?;
    Ok((StatusCode::CREATED, Json(goal)))
}

#[utoipa::path(post, path = "/api/v1/goals/parse", request_body = ParseGoalRequest, responses((status = 201, description = "Goal created from text"), (status = 502, description = "Inference failed")))]
pub async fn parse_goal(
    CurrentUser(user): CurrentUser,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ParseGoalRequest>,
) -> ApiResult<(StatusCode, Json<Goal>)> {
    let goal = state
        .goal_service
        .create_goal_from_text(&user, &payload.text, today_utc())
        .await?;
    Ok((StatusCode::CREATED, Json(goal)))
}

#[utoipa::path(get, path = "/api/v1/goals/{id}", responses((status = 200, description = "Goal"), (status = 404, description = "Unknown goal")))]
pub async fn get_goal(
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Goal>> {
    let goal = state.goal_service.get_goal(&user, &id)?;
    Ok(Json(goal))
}

#[utoipa::path(delete, path = "/api/v1/goals/{id}", responses((status = 204), (status = 404, description = "Unknown goal")))]
pub async fn delete_goal(
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.goal_service.delete_goal(&user, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/goals", get(list_goals).post(create_goal))
        .route("/goals/parse", post(parse_goal))
        .route("/goals/{id}", get(get_goal).delete(delete_goal))
}
