use async_trait::async_trait;

use super::contributions_model::{
    Contribution, ContributionPoint, ContributionReceipt, ContributionWithGoal, GoalLedgerTotal,
    LedgerDiscrepancy, NewContribution, SortOrder,
};
use crate::errors::Result;
use crate::identity::UserId;

/// Trait for contribution ledger storage.
#[async_trait]
pub trait ContributionRepositoryTrait: Send + Sync {
    /// Appends a contribution and rewrites the goal's `current_amount` and
    /// `status` from the ledger sum, atomically.
    async fn append_contribution(
        &self,
        user: &UserId,
        new_contribution: NewContribution,
    ) -> Result<ContributionReceipt>;
    fn list_by_goal(
        &self,
        user: &UserId,
        goal_id: &str,
        order: SortOrder,
    ) -> Result<Vec<Contribution>>;
    /// Most recent contributions across all of the user's goals.
    fn list_recent(&self, user: &UserId, limit: i64) -> Result<Vec<ContributionWithGoal>>;
    fn ledger_totals(&self, user: &UserId) -> Result<Vec<GoalLedgerTotal>>;
}

/// Trait for contribution ledger operations
#[async_trait]
pub trait ContributionServiceTrait: Send + Sync {
    async fn add_contribution(
        &self,
        user: &UserId,
        goal_id: &str,
        raw_amount: &str,
        notes: Option<String>,
    ) -> Result<ContributionReceipt>;
    fn get_contributions(
        &self,
        user: &UserId,
        goal_id: &str,
        order: SortOrder,
    ) -> Result<Vec<Contribution>>;
    fn get_recent_contributions(
        &self,
        user: &UserId,
        limit: Option<i64>,
    ) -> Result<Vec<ContributionWithGoal>>;
    fn get_contribution_trend(&self, user: &UserId, goal_id: &str)
        -> Result<Vec<ContributionPoint>>;
    fn verify_consistency(&self, user: &UserId) -> Result<Vec<LedgerDiscrepancy>>;
}
