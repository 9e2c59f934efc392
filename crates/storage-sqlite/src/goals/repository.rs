use goalwise_core::errors::Error;
use goalwise_core::goals::{Goal, GoalRecord, GoalRepositoryTrait, GoalStatus};
use goalwise_core::identity::UserId;
use goalwise_core::utils::time_utils::now_utc;
use goalwise_core::Result;
use rust_decimal::Decimal;

use super::model::GoalDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{goal_contributions, goals};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use std::sync::Arc;
use uuid::Uuid;

pub struct GoalRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl GoalRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        GoalRepository { pool, writer }
    }
}

/// Loads a goal owned by `user` on the given connection.
pub(crate) fn find_goal(
    conn: &mut SqliteConnection,
    user: &UserId,
    goal_id: &str,
) -> Result<Goal> {
    goals::table
        .filter(goals::id.eq(goal_id))
        .filter(goals::user_id.eq(user.as_str()))
        .select(GoalDB::as_select())
        .first::<GoalDB>(conn)
        .optional()
        .map_err(StorageError::from)?
        .map(Goal::from)
        .ok_or_else(|| Error::NotFound(format!("Goal {}", goal_id)))
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    fn list_goals(&self, user: &UserId) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let goals_db = goals::table
            .filter(goals::user_id.eq(user.as_str()))
            .order((goals::created_at.desc(), goals::id.desc()))
            .select(GoalDB::as_select())
            .load::<GoalDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(goals_db.into_iter().map(Goal::from).collect())
    }

    fn get_goal(&self, user: &UserId, goal_id: &str) -> Result<Goal> {
        let mut conn = get_connection(&self.pool)?;
        find_goal(&mut conn, user, goal_id)
    }

    async fn insert_goal(&self, user: &UserId, record: GoalRecord) -> Result<Goal> {
        let now = now_utc();
        let new_goal_db: GoalDB = Goal {
            id: Uuid::new_v4().to_string(),
            user_id: user.clone(),
            title: record.title,
            target_amount: record.target_amount,
            current_amount: Decimal::ZERO,
            deadline: record.deadline,
            monthly_target: record.monthly_target,
            category: record.category,
            status: GoalStatus::Active,
            created_at: now,
            updated_at: now,
        }
        .into();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let result_db = diesel::insert_into(goals::table)
                    .values(&new_goal_db)
                    .returning(GoalDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Goal::from(result_db))
            })
            .await
    }

    async fn delete_goal(&self, user: &UserId, goal_id: &str) -> Result<usize> {
        let user_id = user.as_str().to_string();
        let goal_id = goal_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let deleted = diesel::delete(
                    goals::table
                        .filter(goals::id.eq(goal_id.as_str()))
                        .filter(goals::user_id.eq(user_id.as_str())),
                )
                .execute(conn)
                .map_err(StorageError::from)?;

                if deleted > 0 {
                    diesel::delete(
                        goal_contributions::table
                            .filter(goal_contributions::goal_id.eq(goal_id.as_str())),
                    )
                    .execute(conn)
                    .map_err(StorageError::from)?;
                }
                Ok(deleted)
            })
            .await
    }
}
