use std::sync::Arc;

use chrono::NaiveDate;

use super::dashboard_model::{DashboardSnapshot, GoalView};
use crate::contributions::ContributionServiceTrait;
use crate::errors::Result;
use crate::goals::GoalServiceTrait;
use crate::identity::UserId;
use crate::summary::{saved_by_category, summarize, GoalsSummary};
use crate::utils::time_utils::now_utc;

/// Trait for dashboard read operations
pub trait DashboardServiceTrait: Send + Sync {
    fn summary(&self, user: &UserId) -> Result<GoalsSummary>;
    fn snapshot(&self, user: &UserId, today: NaiveDate) -> Result<DashboardSnapshot>;
}

pub struct DashboardService {
    goal_service: Arc<dyn GoalServiceTrait>,
    contribution_service: Arc<dyn ContributionServiceTrait>,
}

impl DashboardService {
    pub fn new(
        goal_service: Arc<dyn GoalServiceTrait>,
        contribution_service: Arc<dyn ContributionServiceTrait>,
    ) -> Self {
        Self {
            goal_service,
            contribution_service,
        }
    }
}

impl DashboardServiceTrait for DashboardService {
    fn summary(&self, user: &UserId) -> Result<GoalsSummary> {
        let goals = self.goal_service.get_goals(user)?;
        Ok(summarize(&goals))
    }

    fn snapshot(&self, user: &UserId, today: NaiveDate) -> Result<DashboardSnapshot> {
        let goals = self.goal_service.get_goals(user)?;
        let recent_contributions = self
            .contribution_service
            .get_recent_contributions(user, None)?;

        let summary = summarize(&goals);
        let saved_by_category = saved_by_category(&goals);
        Ok(DashboardSnapshot {
            user_id: user.clone(),
            saved_percent: summary.saved_percent(),
            summary,
            saved_by_category,
            goals: goals
                .into_iter()
                .map(|goal| GoalView::new(goal, today))
                .collect(),
            recent_contributions,
            generated_at: now_utc(),
        })
    }
}
