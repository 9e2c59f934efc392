use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::goals::GoalCategory;

/// Target amount summed over every goal of one category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: GoalCategory,
    pub amount: Decimal,
}

/// Portfolio-level totals over a user's goals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GoalsSummary {
    pub total_target: Decimal,
    pub total_saved: Decimal,
    pub total_monthly: Decimal,
    pub active_count: usize,
    pub total_goals: usize,
    /// Groups in the order each category first appears.
    pub by_category: Vec<CategoryTotal>,
}

impl GoalsSummary {
    /// Share of the total target already saved, `None` when there is no
    /// target to measure against or the ratio is out of range.
    pub fn saved_percent(&self) -> Option<Decimal> {
        if self.total_target <= Decimal::ZERO {
            return None;
        }
        self.total_saved
            .checked_div(self.total_target)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
    }
}
