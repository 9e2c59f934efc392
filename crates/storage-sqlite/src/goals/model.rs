//! Database models for goals.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use goalwise_core::goals::{Goal, GoalCategory, GoalStatus};
use goalwise_core::identity::UserId;
use log::warn;

use crate::utils::parse_decimal;

/// Database model for goals
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GoalDB {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub target_amount: String,
    pub current_amount: String,
    pub deadline: NaiveDate,
    pub monthly_target: String,
    pub category: String,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Conversion to domain models
impl From<GoalDB> for Goal {
    fn from(db: GoalDB) -> Self {
        let category = db.category.parse::<GoalCategory>().unwrap_or_else(|_| {
            warn!("Goal {} has unknown category '{}'", db.id, db.category);
            GoalCategory::Other
        });
        let status = db.status.parse::<GoalStatus>().unwrap_or_else(|_| {
            warn!("Goal {} has unknown status '{}'", db.id, db.status);
            GoalStatus::Active
        });
        Self {
            target_amount: parse_decimal("goals.target_amount", &db.target_amount),
            current_amount: parse_decimal("goals.current_amount", &db.current_amount),
            monthly_target: parse_decimal("goals.monthly_target", &db.monthly_target),
            id: db.id,
            user_id: UserId::from_stored(db.user_id),
            title: db.title,
            deadline: db.deadline,
            category,
            status,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<Goal> for GoalDB {
    fn from(domain: Goal) -> Self {
        Self {
            id: domain.id,
            user_id: domain.user_id.as_str().to_string(),
            title: domain.title,
            target_amount: domain.target_amount.to_string(),
            current_amount: domain.current_amount.to_string(),
            deadline: domain.deadline,
            monthly_target: domain.monthly_target.to_string(),
            category: domain.category.as_str().to_string(),
            status: domain.status.as_str().to_string(),
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
