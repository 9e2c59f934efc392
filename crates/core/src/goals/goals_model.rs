//! Goals domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, ValidationError};
use crate::identity::UserId;

/// Fixed set of goal categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GoalCategory {
    Savings,
    Purchase,
    Investment,
    Emergency,
    Education,
    Travel,
    #[default]
    Other,
}

impl GoalCategory {
    pub const ALL: [GoalCategory; 7] = [
        GoalCategory::Savings,
        GoalCategory::Purchase,
        GoalCategory::Investment,
        GoalCategory::Emergency,
        GoalCategory::Education,
        GoalCategory::Travel,
        GoalCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GoalCategory::Savings => "savings",
            GoalCategory::Purchase => "purchase",
            GoalCategory::Investment => "investment",
            GoalCategory::Emergency => "emergency",
            GoalCategory::Education => "education",
            GoalCategory::Travel => "travel",
            GoalCategory::Other => "other",
        }
    }
}

impl fmt::Display for GoalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        GoalCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == needle)
            .ok_or_else(|| {
                Error::Validation(ValidationError::InvalidInput(format!(
                    "Unknown goal category '{}'",
                    s
                )))
            })
    }
}

/// Lifecycle state of a goal, derived from its amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    #[default]
    Active,
    Completed,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Active => "active",
            GoalStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(GoalStatus::Active),
            "completed" => Ok(GoalStatus::Completed),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown goal status '{}'",
                other
            )))),
        }
    }
}

/// Domain model representing a goal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub user_id: UserId,
    pub title: String,
    pub target_amount: Decimal,
    /// Cached sum of the goal's contributions.
    pub current_amount: Decimal,
    pub deadline: NaiveDate,
    pub monthly_target: Decimal,
    pub category: GoalCategory,
    pub status: GoalStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Goal {
    pub fn is_completed(&self) -> bool {
        self.status == GoalStatus::Completed
    }
}

/// Input model for creating a new goal
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub title: String,
    pub target_amount: Decimal,
    pub deadline: NaiveDate,
    #[serde(default)]
    pub category: GoalCategory,
}

/// Fully derived goal row handed to the repository for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalRecord {
    pub title: String,
    pub target_amount: Decimal,
    pub deadline: NaiveDate,
    pub monthly_target: Decimal,
    pub category: GoalCategory,
}

/// Structured goal extracted from free text by the inference service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParsedGoal {
    pub title: String,
    pub amount: Decimal,
    pub deadline: NaiveDate,
    pub category: GoalCategory,
}

impl From<ParsedGoal> for NewGoal {
    fn from(parsed: ParsedGoal) -> Self {
        Self {
            title: parsed.title,
            target_amount: parsed.amount,
            deadline: parsed.deadline,
            category: parsed.category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!(
            "Travel".parse::<GoalCategory>().unwrap(),
            GoalCategory::Travel
        );
        assert_eq!(
            " emergency ".parse::<GoalCategory>().unwrap(),
            GoalCategory::Emergency
        );
        assert!("yacht".parse::<GoalCategory>().is_err());
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&GoalStatus::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
    }
}
