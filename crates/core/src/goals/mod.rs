//! Goals module - domain models, accounting rules, services, and traits.

pub mod goals_accounting;
mod goals_model;
mod goals_service;
mod goals_traits;

#[cfg(test)]
mod goals_service_tests;

pub use goals_accounting::{
    apply_contribution, compute_monthly_target, compute_progress_percent,
    parse_contribution_amount, status_for, ContributionOutcome,
};
pub use goals_model::{Goal, GoalCategory, GoalRecord, GoalStatus, NewGoal, ParsedGoal};
pub use goals_service::GoalService;
pub use goals_traits::{GoalParserTrait, GoalRepositoryTrait, GoalServiceTrait};
