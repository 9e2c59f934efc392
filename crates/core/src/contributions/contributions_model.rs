//! Contribution ledger domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::goals::{Goal, GoalStatus};
use crate::identity::UserId;

/// A single deposit toward a goal. Immutable once recorded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    pub id: String,
    pub goal_id: String,
    pub user_id: UserId,
    pub amount: Decimal,
    pub notes: Option<String>,
    pub contributed_at: NaiveDateTime,
}

/// Input model for appending a contribution
#[derive(Debug, Clone, PartialEq)]
pub struct NewContribution {
    pub goal_id: String,
    pub amount: Decimal,
    pub notes: Option<String>,
}

/// Contribution joined with the title of the goal it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContributionWithGoal {
    #[serde(flatten)]
    pub contribution: Contribution,
    pub goal_title: String,
}

/// What an append produced: the new ledger entry and the goal as updated
/// in the same transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContributionReceipt {
    pub contribution: Contribution,
    pub goal: Goal,
}

/// Ordering of a goal's contributions by timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// One point of a goal's contribution chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContributionPoint {
    /// `#1`, `#2`, ... in chronological order.
    pub label: String,
    pub amount: Decimal,
    /// Short day-month label, e.g. `05 Mar`.
    pub date_label: String,
    pub contributed_at: NaiveDateTime,
}

/// Cached goal totals next to the sum of the goal's ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalLedgerTotal {
    pub goal_id: String,
    pub title: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub status: GoalStatus,
    pub ledger_amount: Decimal,
}

/// A goal whose cached aggregate disagrees with its ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LedgerDiscrepancy {
    pub goal_id: String,
    pub goal_title: String,
    pub cached_amount: Decimal,
    pub ledger_amount: Decimal,
    pub cached_status: GoalStatus,
    pub expected_status: GoalStatus,
}
