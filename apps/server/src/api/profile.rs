use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use super::models::{ProfileResponse, ProfileUpdateRequest};
use crate::{auth::CurrentUser, error::ApiResult, main_lib::AppState};

#[utoipa::path(get, path = "/api/v1/profile", responses((status = 200, description = "Profile with initials")))]
pub async fn get_profile(
    CurrentUser(user): CurrentUser,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ProfileResponse>> {
    let profile = state.profile_service.get_profile(&user)?;
    Ok(Json(profile.into()))
}

#[utoipa::path(put, path = "/api/v1/profile", request_body = ProfileUpdateRequest, responses((status = 200, description = "Updated profile")))]
pub async fn update_profile(
    CurrentUser(user): CurrentUser,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ProfileUpdateRequest>,
) -> ApiResult<Json<ProfileResponse>> {
    let profile = state
        .profile_service
        .update_profile(&user, payload.into())
        .await?;
    Ok(Json(profile.into()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/profile", get(get_profile).put(update_profile))
}
