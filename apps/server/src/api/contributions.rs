use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use goalwise_core::contributions::{
    Contribution, ContributionPoint, ContributionReceipt, ContributionWithGoal, SortOrder,
};
use serde::Deserialize;

use super::models::{AddContributionRequest, LedgerReport};
use crate::{
    auth::CurrentUser,
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(Debug, Deserialize)]
pub struct OrderQuery {
    order: Option<String>,
}

fn parse_order(raw: Option<&str>) -> Result<SortOrder, ApiError> {
    match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") | Some("desc") => Ok(SortOrder::Desc),
        Some("asc") => Ok(SortOrder::Asc),
        Some(other) => Err(ApiError::BadRequest(format!(
            "order must be 'asc' or 'desc', got '{}'",
            other
        ))),
    }
}

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    limit: Option<i64>,
}

#[utoipa::path(get, path = "/api/v1/goals/{id}/contributions", params(("order" = Option<String>, Query, description = "asc or desc")), responses((status = 200, description = "Contributions of one goal")))]
pub async fn list_contributions(
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    Query(query): Query<OrderQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Contribution>>> {
    let order = parse_order(query.order.as_deref())?;
    let items = state
        .contribution_service
        .get_contributions(&user, &id, order)?;
    Ok(Json(items))
}

#[utoipa::path(post, path = "/api/v1/goals/{id}/contributions", request_body = AddContributionRequest, responses((status = 201, description = "Contribution and updated goal"), (status = 400, description = "Invalid amount")))]
pub async fn add_contribution(
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AddContributionRequest>,
) -> ApiResult<(StatusCode, Json<ContributionReceipt>)> {
    let receipt = state
        .contribution_service
        .add_contribution(&user, &id, &payload.amount.as_raw(), payload.notes)
        .await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

#[utoipa::path(get, path = "/api/v1/goals/{id}/trend", responses((status = 200, description = "Chart series, oldest first")))]
pub async fn contribution_trend(
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ContributionPoint>>> {
    let points = state
        .contribution_service
        .get_contribution_trend(&user, &id)?;
    Ok(Json(points))
}

#[utoipa::path(get, path = "/api/v1/contributions/recent", params(("limit" = Option<i64>, Query, description = "1..=100")), responses((status = 200, description = "Recent contributions with goal titles")))]
pub async fn recent_contributions(
    CurrentUser(user): CurrentUser,
    Query(query): Query<LimitQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ContributionWithGoal>>> {
    let items = state
        .contribution_service
        .get_recent_contributions(&user, query.limit)?;
    Ok(Json(items))
}

#[utoipa::path(get, path = "/api/v1/ledger/verify", responses((status = 200, description = "Goals whose cached totals disagree with the ledger")))]
pub async fn verify_ledger(
    CurrentUser(user): CurrentUser,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<LedgerReport>> {
    let discrepancies = state.contribution_service.verify_consistency(&user)?;
    Ok(Json(LedgerReport {
        consistent: discrepancies.is_empty(),
        discrepancies,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/goals/{id}/contributions",
            get(list_contributions).post(add_contribution),
        )
        .route("/goals/{id}/trend", get(contribution_trend))
        .route("/contributions/recent", get(recent_contributions))
        .route("/ledger/verify", get(verify_ledger))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_defaults_to_newest_first() {
        assert_eq!(parse_order(None).unwrap(), SortOrder::Desc);
        assert_eq!(parse_order(Some("ASC")).unwrap(), SortOrder::Asc);
        assert!(parse_order(Some("sideways")).is_err());
    }
}
