use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use diesel::dsl::sql;
use diesel::expression::SqlLiteral;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use diesel::SqliteConnection;
use goalwise_core::contributions::{
    Contribution, ContributionReceipt, ContributionRepositoryTrait, ContributionWithGoal,
    GoalLedgerTotal, NewContribution, SortOrder,
};
use goalwise_core::goals::{apply_contribution, Goal};
use goalwise_core::identity::UserId;
use goalwise_core::utils::time_utils::now_utc;
use goalwise_core::{Error, Result};
use log::{debug, warn};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::model::ContributionDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::goals::{find_goal, GoalDB};
use crate::schema::{goal_contributions, goals};
use crate::utils::parse_decimal;

pub struct ContributionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ContributionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        ContributionRepository { pool, writer }
    }
}

/// Insertion order, for contributions that share a timestamp.
fn ledger_seq() -> SqlLiteral<BigInt> {
    sql::<BigInt>("goal_contributions.rowid")
}

fn ledger_sum(conn: &mut SqliteConnection, goal_id: &str) -> Result<Decimal> {
    let amounts = goal_contributions::table
        .filter(goal_contributions::goal_id.eq(goal_id))
        .select(goal_contributions::amount)
        .load::<String>(conn)
        .map_err(StorageError::from)?;
    amounts.iter().try_fold(Decimal::ZERO, |total, raw| {
        total
            .checked_add(parse_decimal("goal_contributions.amount", raw))
            .ok_or_else(|| {
                Error::Consistency(format!("Ledger total for goal {} overflows", goal_id))
            })
    })
}

#[async_trait]
impl ContributionRepositoryTrait for ContributionRepository {
    async fn append_contribution(
        &self,
        user: &UserId,
        new_contribution: NewContribution,
    ) -> Result<ContributionReceipt> {
        let user = user.clone();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ContributionReceipt> {
                let mut goal = find_goal(conn, &user, &new_contribution.goal_id)?;
                // The ledger is the source of truth; the cached total follows it.
                goal.current_amount = ledger_sum(conn, &goal.id)?;
                let outcome = apply_contribution(&goal, new_contribution.amount)?;

                let now = now_utc();
                let contribution = Contribution {
                    id: Uuid::new_v4().to_string(),
                    goal_id: goal.id.clone(),
                    user_id: user.clone(),
                    amount: new_contribution.amount,
                    notes: new_contribution.notes,
                    contributed_at: now,
                };
                diesel::insert_into(goal_contributions::table)
                    .values(&ContributionDB::from(contribution.clone()))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                diesel::update(goals::table.find(goal.id.as_str()))
                    .set((
                        goals::current_amount.eq(outcome.new_current.to_string()),
                        goals::status.eq(outcome.new_status.as_str()),
                        goals::updated_at.eq(now),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                debug!(
                    "Goal {} total is now {} ({})",
                    goal.id, outcome.new_current, outcome.new_status
                );
                goal.current_amount = outcome.new_current;
                goal.status = outcome.new_status;
                goal.updated_at = now;
                Ok(ContributionReceipt { contribution, goal })
            })
            .await
    }

    fn list_by_goal(
        &self,
        user: &UserId,
        goal_id: &str,
        order: SortOrder,
    ) -> Result<Vec<Contribution>> {
        let mut conn = get_connection(&self.pool)?;
        let query = goal_contributions::table
            .filter(goal_contributions::goal_id.eq(goal_id))
            .filter(goal_contributions::user_id.eq(user.as_str()))
            .select(ContributionDB::as_select())
            .into_boxed();
        let query = match order {
            SortOrder::Asc => {
                query.order((goal_contributions::contributed_at.asc(), ledger_seq().asc()))
            }
            SortOrder::Desc => {
                query.order((goal_contributions::contributed_at.desc(), ledger_seq().desc()))
            }
        };
        let rows = query
            .load::<ContributionDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Contribution::from).collect())
    }

    fn list_recent(&self, user: &UserId, limit: i64) -> Result<Vec<ContributionWithGoal>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = goal_contributions::table
            .inner_join(goals::table)
            .filter(goal_contributions::user_id.eq(user.as_str()))
            .order((goal_contributions::contributed_at.desc(), ledger_seq().desc()))
            .limit(limit)
            .select((ContributionDB::as_select(), goals::title))
            .load::<(ContributionDB, String)>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows
            .into_iter()
            .map(|(contribution, goal_title)| ContributionWithGoal {
                contribution: contribution.into(),
                goal_title,
            })
            .collect())
    }

    fn ledger_totals(&self, user: &UserId) -> Result<Vec<GoalLedgerTotal>> {
        let mut conn = get_connection(&self.pool)?;
        let goals_db = goals::table
            .filter(goals::user_id.eq(user.as_str()))
            .order((goals::created_at.desc(), goals::id.desc()))
            .select(GoalDB::as_select())
            .load::<GoalDB>(&mut conn)
            .map_err(StorageError::from)?;
        let entries = goal_contributions::table
            .filter(goal_contributions::user_id.eq(user.as_str()))
            .select((goal_contributions::goal_id, goal_contributions::amount))
            .load::<(String, String)>(&mut conn)
            .map_err(StorageError::from)?;

        let mut sums: HashMap<String, Decimal> = HashMap::new();
        for (goal_id, amount) in entries {
            let sum = sums.entry(goal_id).or_default();
            let amount = parse_decimal("goal_contributions.amount", &amount);
            *sum = sum.checked_add(amount).unwrap_or_else(|| {
                warn!("Ledger total overflows, capping at the largest decimal");
                Decimal::MAX
            });
        }

        Ok(goals_db
            .into_iter()
            .map(Goal::from)
            .map(|goal| GoalLedgerTotal {
                ledger_amount: sums.get(&goal.id).copied().unwrap_or_default(),
                goal_id: goal.id,
                title: goal.title,
                target_amount: goal.target_amount,
                current_amount: goal.current_amount,
                status: goal.status,
            })
            .collect())
    }
}
