//! Dashboard module - composes goals, aggregates and history, and keeps
//! them fresh from change notifications.

mod dashboard_model;
mod dashboard_orchestrator;
mod dashboard_service;

pub use dashboard_model::{DashboardSnapshot, GoalView};
pub use dashboard_orchestrator::DashboardOrchestrator;
pub use dashboard_service::{DashboardService, DashboardServiceTrait};
