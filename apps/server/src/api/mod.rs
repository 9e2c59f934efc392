use std::sync::Arc;

use axum::{http::HeaderValue, routing::get, Json, Router};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{config::Config, main_lib::AppState};

pub mod contributions;
pub mod dashboard;
pub mod goals;
pub mod models;
pub mod profile;

#[utoipa::path(get, path = "/api/v1/healthz", responses((status = 200, description = "Health")))]
pub async fn healthz() -> &'static str {
    "ok"
}

#[derive(OpenApi)]
#[openapi(
    paths(
        healthz,
        goals::list_goals,
        goals::create_goal,
        goals::parse_goal,
        goals::get_goal,
        goals::delete_goal,
        contributions::list_contributions,
        contributions::add_contribution,
        contributions::contribution_trend,
        contributions::recent_contributions,
        contributions::verify_ledger,
        dashboard::get_summary,
        dashboard::get_dashboard,
        dashboard::stream_dashboard,
        profile::get_profile,
        profile::update_profile,
    ),
    components(schemas(
        models::CreateGoalRequest,
        models::ParseGoalRequest,
        models::AddContributionRequest,
        models::ProfileUpdateRequest,
    )),
    tags((name = "goalwise"))
)]
pub struct ApiDoc;

fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_allow.iter().any(|o| o == "*") {
        return CorsLayer::new().allow_origin(Any).allow_headers(Any).allow_methods(Any);
    }
    let origins: Vec<HeaderValue> = config
        .cors_allow
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(origin) => Some(origin),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", o);
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_headers(Any)
        .allow_methods(Any)
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let openapi = ApiDoc::openapi();

    let api = Router::new()
        .route("/healthz", get(healthz))
        .merge(goals::router())
        .merge(contributions::router())
        .merge(dashboard::router())
        .merge(profile::router());

    Router::new()
        .nest("/api/v1", api)
        .route(
            "/openapi.json",
            get(move || {
                let doc = openapi.clone();
                async move { Json(doc) }
            }),
        )
        .with_state(state)
        .layer(cors_layer(config))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
