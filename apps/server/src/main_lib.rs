use std::sync::Arc;

use crate::{config::Config, events::EventBus};
use goalwise_ai::{LlmGoalParser, LlmGoalParserConfig};
use goalwise_core::{
    contributions::{ContributionService, ContributionServiceTrait},
    dashboard::{DashboardService, DashboardServiceTrait},
    events::DomainEventSink,
    goals::{GoalParserTrait, GoalService, GoalServiceTrait},
    profiles::{ProfileService, ProfileServiceTrait},
};
use goalwise_storage_sqlite::{
    contributions::ContributionRepository,
    db::{self, spawn_writer},
    goals::GoalRepository,
    profiles::ProfileRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Buffered events per subscriber before a slow stream starts lagging.
const EVENT_BUS_CAPACITY: usize = 256;

pub struct AppState {
    pub goal_service: Arc<dyn GoalServiceTrait>,
    pub contribution_service: Arc<dyn ContributionServiceTrait>,
    pub dashboard_service: Arc<dyn DashboardServiceTrait>,
    pub profile_service: Arc<dyn ProfileServiceTrait>,
    pub event_bus: EventBus,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("GW_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let parser = LlmGoalParser::new(LlmGoalParserConfig {
        api_key: config.ai_api_key.clone(),
        base_url: config.ai_base_url.clone(),
        model: config.ai_model.clone(),
    });
    if !parser.is_configured() {
        tracing::warn!("GW_AI_API_KEY is not set; natural-language goal creation will fail");
    }
    build_state_with_parser(config, Arc::new(parser)).await
}

/// Wires storage, services and the event bus around the given goal parser.
pub async fn build_state_with_parser(
    config: &Config,
    goal_parser: Arc<dyn GoalParserTrait>,
) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = spawn_writer((*pool).clone());

    let event_bus = EventBus::new(EVENT_BUS_CAPACITY);
    let event_sink: Arc<dyn DomainEventSink> = Arc::new(event_bus.clone());

    let goal_repo = Arc::new(GoalRepository::new(pool.clone(), writer.clone()));
    let contribution_repo = Arc::new(ContributionRepository::new(pool.clone(), writer.clone()));
    let profile_repo = Arc::new(ProfileRepository::new(pool.clone(), writer.clone()));

    let goal_service: Arc<dyn GoalServiceTrait> = Arc::new(GoalService::new(
        goal_repo.clone(),
        goal_parser,
        event_sink.clone(),
    ));
    let contribution_service: Arc<dyn ContributionServiceTrait> = Arc::new(
        ContributionService::new(contribution_repo, goal_repo, event_sink.clone())
            .with_recent_limit(config.recent_history_limit),
    );
    let dashboard_service: Arc<dyn DashboardServiceTrait> = Arc::new(DashboardService::new(
        goal_service.clone(),
        contribution_service.clone(),
    ));
    let profile_service: Arc<dyn ProfileServiceTrait> =
        Arc::new(ProfileService::new(profile_repo, event_sink));

    Ok(Arc::new(AppState {
        goal_service,
        contribution_service,
        dashboard_service,
        profile_service,
        event_bus,
        db_path,
    }))
}
