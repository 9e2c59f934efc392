use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, info, warn};

use super::goals_accounting::{compute_monthly_target, validate_new_goal};
use super::goals_model::{Goal, GoalRecord, NewGoal};
use super::goals_traits::{GoalParserTrait, GoalRepositoryTrait, GoalServiceTrait};
use crate::errors::{Error, Result, ValidationError};
use crate::events::{DomainEvent, DomainEventSink, GoalChangeKind};
use crate::identity::UserId;

pub struct GoalService {
    goal_repo: Arc<dyn GoalRepositoryTrait>,
    goal_parser: Arc<dyn GoalParserTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl GoalService {
    pub fn new(
        goal_repo: Arc<dyn GoalRepositoryTrait>,
        goal_parser: Arc<dyn GoalParserTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        GoalService {
            goal_repo,
            goal_parser,
            event_sink,
        }
    }

    fn build_record(new_goal: NewGoal, today: NaiveDate) -> Result<GoalRecord> {
        validate_new_goal(&new_goal.title, new_goal.target_amount)?;
        let monthly_target =
            compute_monthly_target(new_goal.target_amount, new_goal.deadline, today);
        Ok(GoalRecord {
            title: new_goal.title.trim().to_string(),
            target_amount: new_goal.target_amount,
            deadline: new_goal.deadline,
            monthly_target,
            category: new_goal.category,
        })
    }
}

#[async_trait]
impl GoalServiceTrait for GoalService {
    fn get_goals(&self, user: &UserId) -> Result<Vec<Goal>> {
        self.goal_repo.list_goals(user)
    }

    fn get_goal(&self, user: &UserId, goal_id: &str) -> Result<Goal> {
        self.goal_repo.get_goal(user, goal_id)
    }

    async fn create_goal(
        &self,
        user: &UserId,
        new_goal: NewGoal,
        today: NaiveDate,
    ) -> Result<Goal> {
        let record = Self::build_record(new_goal, today)?;
        let goal = self.goal_repo.insert_goal(user, record).await?;
        info!("Created goal {} for user {}", goal.id, user);
        self.event_sink.emit(DomainEvent::goals_changed(
            user.clone(),
            vec![goal.id.clone()],
            GoalChangeKind::Created,
        ));
        Ok(goal)
    }

    async fn create_goal_from_text(
        &self,
        user: &UserId,
        input: &str,
        today: NaiveDate,
    ) -> Result<Goal> {
        let input = input.trim();
        if input.is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "input".to_string(),
            )));
        }

        let parsed = self.goal_parser.parse_goal(input, today).await.map_err(|e| {
            warn!("Goal parsing failed for user {}: {}", user, e);
            match e {
                Error::Upstream(_) => e,
                other => Error::Upstream(other.to_string()),
            }
        })?;
        debug!("Parsed goal input into {:?}", parsed);

        self.create_goal(user, parsed.into(), today).await
    }

    async fn delete_goal(&self, user: &UserId, goal_id: &str) -> Result<usize> {
        let deleted = self.goal_repo.delete_goal(user, goal_id).await?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Goal {}", goal_id)));
        }
        self.event_sink.emit(DomainEvent::goals_changed(
            user.clone(),
            vec![goal_id.to_string()],
            GoalChangeKind::Deleted,
        ));
        Ok(deleted)
    }
}
