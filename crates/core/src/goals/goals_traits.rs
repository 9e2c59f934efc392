use crate::errors::Result;
use crate::goals::goals_model::{Goal, GoalRecord, NewGoal, ParsedGoal};
use crate::identity::UserId;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Trait for goal repository operations
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    /// Goals owned by `user`, newest first.
    fn list_goals(&self, user: &UserId) -> Result<Vec<Goal>>;
    fn get_goal(&self, user: &UserId, goal_id: &str) -> Result<Goal>;
    async fn insert_goal(&self, user: &UserId, record: GoalRecord) -> Result<Goal>;
    /// Removes the goal and all of its contributions in one transaction.
    async fn delete_goal(&self, user: &UserId, goal_id: &str) -> Result<usize>;
}

/// Inference interface: free text plus the current date in, structured goal out.
#[async_trait]
pub trait GoalParserTrait: Send + Sync {
    async fn parse_goal(&self, input: &str, today: NaiveDate) -> Result<ParsedGoal>;
}

/// Trait for goal service operations
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    fn get_goals(&self, user: &UserId) -> Result<Vec<Goal>>;
    fn get_goal(&self, user: &UserId, goal_id: &str) -> Result<Goal>;
    async fn create_goal(&self, user: &UserId, new_goal: NewGoal, today: NaiveDate)
        -> Result<Goal>;
    async fn create_goal_from_text(
        &self,
        user: &UserId,
        input: &str,
        today: NaiveDate,
    ) -> Result<Goal>;
    async fn delete_goal(&self, user: &UserId, goal_id: &str) -> Result<usize>;
}
