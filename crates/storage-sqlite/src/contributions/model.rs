//! Database models for contributions.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use goalwise_core::contributions::Contribution;
use goalwise_core::identity::UserId;

use crate::goals::GoalDB;
use crate::utils::parse_decimal;

/// Database model for a ledger entry
#[derive(
    Queryable, Identifiable, Insertable, Selectable, Associations, PartialEq, Debug, Clone,
)]
#[diesel(belongs_to(GoalDB, foreign_key = goal_id))]
#[diesel(table_name = crate::schema::goal_contributions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ContributionDB {
    pub id: String,
    pub goal_id: String,
    pub user_id: String,
    pub amount: String,
    pub notes: Option<String>,
    pub contributed_at: NaiveDateTime,
}

impl From<ContributionDB> for Contribution {
    fn from(db: ContributionDB) -> Self {
        Self {
            amount: parse_decimal("goal_contributions.amount", &db.amount),
            id: db.id,
            goal_id: db.goal_id,
            user_id: UserId::from_stored(db.user_id),
            notes: db.notes,
            contributed_at: db.contributed_at,
        }
    }
}

impl From<Contribution> for ContributionDB {
    fn from(domain: Contribution) -> Self {
        Self {
            id: domain.id,
            goal_id: domain.goal_id,
            user_id: domain.user_id.as_str().to_string(),
            amount: domain.amount.to_string(),
            notes: domain.notes,
            contributed_at: domain.contributed_at,
        }
    }
}
