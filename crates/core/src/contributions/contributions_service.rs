use std::sync::Arc;

use async_trait::async_trait;
use log::{error, info};

use super::contributions_model::{
    Contribution, ContributionPoint, ContributionReceipt, ContributionWithGoal,
    LedgerDiscrepancy, NewContribution, SortOrder,
};
use super::contributions_traits::{ContributionRepositoryTrait, ContributionServiceTrait};
use crate::constants::{DEFAULT_RECENT_HISTORY_LIMIT, MAX_RECENT_HISTORY_LIMIT};
use crate::errors::Result;
use crate::events::{DomainEvent, DomainEventSink};
use crate::goals::{parse_contribution_amount, status_for, GoalRepositoryTrait, GoalStatus};
use crate::identity::UserId;
use crate::utils::format_utils::format_day_month;

pub struct ContributionService {
    contribution_repo: Arc<dyn ContributionRepositoryTrait>,
    goal_repo: Arc<dyn GoalRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
    recent_limit: i64,
}

impl ContributionService {
    pub fn new(
        contribution_repo: Arc<dyn ContributionRepositoryTrait>,
        goal_repo: Arc<dyn GoalRepositoryTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        ContributionService {
            contribution_repo,
            goal_repo,
            event_sink,
            recent_limit: DEFAULT_RECENT_HISTORY_LIMIT,
        }
    }

    /// Overrides the history length used when callers don't ask for one.
    pub fn with_recent_limit(mut self, limit: i64) -> Self {
        self.recent_limit = clamp_limit(limit);
        self
    }
}

fn clamp_limit(limit: i64) -> i64 {
    limit.clamp(1, MAX_RECENT_HISTORY_LIMIT)
}

fn normalize_notes(notes: Option<String>) -> Option<String> {
    notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
}

#[async_trait]
impl ContributionServiceTrait for ContributionService {
    async fn add_contribution(
        &self,
        user: &UserId,
        goal_id: &str,
        raw_amount: &str,
        notes: Option<String>,
    ) -> Result<ContributionReceipt> {
        let amount = parse_contribution_amount(raw_amount)?;
        let previous_status = self.goal_repo.get_goal(user, goal_id)?.status;

        let receipt = self
            .contribution_repo
            .append_contribution(
                user,
                NewContribution {
                    goal_id: goal_id.to_string(),
                    amount,
                    notes: normalize_notes(notes),
                },
            )
            .await?;

        if previous_status == GoalStatus::Active && receipt.goal.is_completed() {
            info!("Goal {} reached its target for user {}", goal_id, user);
        }

        self.event_sink.emit(DomainEvent::contribution_added(
            user.clone(),
            goal_id.to_string(),
            receipt.contribution.id.clone(),
        ));
        Ok(receipt)
    }

    fn get_contributions(
        &self,
        user: &UserId,
        goal_id: &str,
        order: SortOrder,
    ) -> Result<Vec<Contribution>> {
        // Surface NotFound for unknown or foreign goals instead of an empty list
        self.goal_repo.get_goal(user, goal_id)?;
        self.contribution_repo.list_by_goal(user, goal_id, order)
    }

    fn get_recent_contributions(
        &self,
        user: &UserId,
        limit: Option<i64>,
    ) -> Result<Vec<ContributionWithGoal>> {
        let limit = limit.map(clamp_limit).unwrap_or(self.recent_limit);
        self.contribution_repo.list_recent(user, limit)
    }

    fn get_contribution_trend(
        &self,
        user: &UserId,
        goal_id: &str,
    ) -> Result<Vec<ContributionPoint>> {
        let contributions = self.get_contributions(user, goal_id, SortOrder::Asc)?;
        Ok(contributions
            .into_iter()
            .enumerate()
            .map(|(index, c)| ContributionPoint {
                label: format!("#{}", index + 1),
                amount: c.amount,
                date_label: format_day_month(c.contributed_at.date()),
                contributed_at: c.contributed_at,
            })
            .collect())
    }

    fn verify_consistency(&self, user: &UserId) -> Result<Vec<LedgerDiscrepancy>> {
        let discrepancies: Vec<LedgerDiscrepancy> = self
            .contribution_repo
            .ledger_totals(user)?
            .into_iter()
            .filter_map(|total| {
                let expected_status = status_for(total.ledger_amount, total.target_amount);
                if total.current_amount == total.ledger_amount && total.status == expected_status
                {
                    return None;
                }
                Some(LedgerDiscrepancy {
                    goal_id: total.goal_id,
                    goal_title: total.title,
                    cached_amount: total.current_amount,
                    ledger_amount: total.ledger_amount,
                    cached_status: total.status,
                    expected_status,
                })
            })
            .collect();

        for d in &discrepancies {
            error!(
                "Ledger divergence for goal {} of user {}: cached {} ({}) vs ledger {} ({})",
                d.goal_id, user, d.cached_amount, d.cached_status, d.ledger_amount, d.expected_status
            );
        }
        Ok(discrepancies)
    }
}
