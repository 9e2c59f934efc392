use chrono::{NaiveDate, NaiveDateTime};
use log::warn;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::contributions::ContributionWithGoal;
use crate::goals::{compute_progress_percent, Goal};
use crate::identity::UserId;
use crate::summary::{CategoryTotal, GoalsSummary};
use crate::utils::format_utils::{
    describe_deadline, format_currency, format_long_date, format_percent,
};
use crate::utils::time_utils::days_remaining;

/// A goal with the derived values a goal card displays.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalView {
    #[serde(flatten)]
    pub goal: Goal,
    pub progress_percent: Decimal,
    pub progress_label: String,
    pub days_remaining: i64,
    pub deadline_label: String,
    pub deadline_display: String,
    pub current_display: String,
    pub target_display: String,
    pub monthly_display: String,
}

impl GoalView {
    pub fn new(goal: Goal, today: NaiveDate) -> Self {
        // Creation rejects non-positive targets; a stored one means bad data
        let progress_percent = compute_progress_percent(goal.current_amount, goal.target_amount)
            .unwrap_or_else(|e| {
                warn!("Goal {} has no usable progress: {}", goal.id, e);
                Decimal::ZERO
            });
        Self {
            progress_label: format_percent(progress_percent),
            progress_percent,
            days_remaining: days_remaining(goal.deadline, today),
            deadline_label: describe_deadline(goal.deadline, today),
            deadline_display: format_long_date(goal.deadline),
            current_display: format_currency(goal.current_amount),
            target_display: format_currency(goal.target_amount),
            monthly_display: format_currency(goal.monthly_target),
            goal,
        }
    }
}

/// Everything the dashboard screen shows, fetched in one pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub user_id: UserId,
    pub goals: Vec<GoalView>,
    pub summary: GoalsSummary,
    pub saved_percent: Option<Decimal>,
    pub saved_by_category: Vec<CategoryTotal>,
    pub recent_contributions: Vec<ContributionWithGoal>,
    pub generated_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::{GoalCategory, GoalStatus};
    use rust_decimal_macros::dec;

    fn goal(target: Decimal, current: Decimal) -> Goal {
        let created_at = NaiveDate::from_ymd_opt(2026, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Goal {
            id: "g1".to_string(),
            user_id: UserId::parse("u1").unwrap(),
            title: "Car".to_string(),
            target_amount: target,
            current_amount: current,
            deadline: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            monthly_target: target / dec!(2),
            category: GoalCategory::Purchase,
            status: GoalStatus::Active,
            created_at,
            updated_at: created_at,
        }
    }

    #[test]
    fn view_derives_progress_and_labels() {
        let today = NaiveDate::from_ymd_opt(2026, 2, 19).unwrap();
        let view = GoalView::new(goal(dec!(200000), dec!(50000)), today);
        assert_eq!(view.progress_percent, dec!(25));
        assert_eq!(view.progress_label, "25.0%");
        assert_eq!(view.days_remaining, 10);
        assert_eq!(view.current_display, "₹50,000");
        assert_eq!(view.target_display, "₹2,00,000");
    }

    #[test]
    fn out_of_range_progress_falls_back_to_zero() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let view = GoalView::new(goal(dec!(0.01), Decimal::MAX), today);
        assert_eq!(view.progress_percent, Decimal::ZERO);

        let view = GoalView::new(goal(Decimal::ZERO, dec!(10)), today);
        assert_eq!(view.progress_percent, Decimal::ZERO);
    }
}
