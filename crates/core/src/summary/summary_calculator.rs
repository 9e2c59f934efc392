use rust_decimal::Decimal;

use super::summary_model::{CategoryTotal, GoalsSummary};
use crate::goals::{Goal, GoalStatus};

/// Rolls a goal set up into portfolio totals and a per-category breakdown.
pub fn summarize(goals: &[Goal]) -> GoalsSummary {
    let mut summary = GoalsSummary {
        total_goals: goals.len(),
        ..GoalsSummary::default()
    };

    for goal in goals {
        // Totals saturate at Decimal::MAX instead of overflowing.
        summary.total_target = summary.total_target.saturating_add(goal.target_amount);
        summary.total_saved = summary.total_saved.saturating_add(goal.current_amount);
        summary.total_monthly = summary.total_monthly.saturating_add(goal.monthly_target);
        if goal.status == GoalStatus::Active {
            summary.active_count += 1;
        }

        match summary
            .by_category
            .iter_mut()
            .find(|group| group.category == goal.category)
        {
            Some(group) => group.amount = group.amount.saturating_add(goal.target_amount),
            None => summary.by_category.push(CategoryTotal {
                category: goal.category,
                amount: goal.target_amount,
            }),
        }
    }

    summary
}

/// Totals saved by category, in the same first-seen order as `summarize`.
pub fn saved_by_category(goals: &[Goal]) -> Vec<CategoryTotal> {
    let mut groups: Vec<CategoryTotal> = Vec::new();
    for goal in goals {
        match groups.iter_mut().find(|g| g.category == goal.category) {
            Some(group) => group.amount = group.amount.saturating_add(goal.current_amount),
            None => groups.push(CategoryTotal {
                category: goal.category,
                amount: goal.current_amount,
            }),
        }
    }
    groups.retain(|g| g.amount > Decimal::ZERO);
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::{status_for, GoalCategory};
    use crate::identity::UserId;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn goal(id: &str, category: GoalCategory, target: Decimal, current: Decimal) -> Goal {
        let now = NaiveDate::from_ymd_opt(2026, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Goal {
            id: id.to_string(),
            user_id: UserId::parse("u1").unwrap(),
            title: format!("Goal {}", id),
            target_amount: target,
            current_amount: current,
            deadline: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
            monthly_target: target / dec!(10),
            category,
            status: status_for(current, target),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn empty_goal_set_is_all_zero() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_target, Decimal::ZERO);
        assert_eq!(summary.total_saved, Decimal::ZERO);
        assert_eq!(summary.total_monthly, Decimal::ZERO);
        assert_eq!(summary.active_count, 0);
        assert_eq!(summary.total_goals, 0);
        assert!(summary.by_category.is_empty());
        assert_eq!(summary.saved_percent(), None);
    }

    #[test]
    fn totals_and_active_count() {
        let goals = vec![
            goal("a", GoalCategory::Travel, dec!(1000), dec!(250)),
            goal("b", GoalCategory::Purchase, dec!(500), dec!(500)),
            goal("c", GoalCategory::Travel, dec!(2000), dec!(0)),
        ];
        let summary = summarize(&goals);
        assert_eq!(summary.total_target, dec!(3500));
        assert_eq!(summary.total_saved, dec!(750));
        assert_eq!(summary.total_monthly, dec!(350));
        assert_eq!(summary.active_count, 2);
        assert_eq!(summary.total_goals, 3);
    }

    #[test]
    fn categories_keep_first_seen_order() {
        let goals = vec![
            goal("a", GoalCategory::Travel, dec!(1000), dec!(0)),
            goal("b", GoalCategory::Emergency, dec!(300), dec!(0)),
            goal("c", GoalCategory::Travel, dec!(2000), dec!(0)),
            goal("d", GoalCategory::Education, dec!(50), dec!(0)),
        ];
        let summary = summarize(&goals);
        let order: Vec<GoalCategory> = summary.by_category.iter().map(|c| c.category).collect();
        assert_eq!(
            order,
            vec![
                GoalCategory::Travel,
                GoalCategory::Emergency,
                GoalCategory::Education
            ]
        );
        assert_eq!(summary.by_category[0].amount, dec!(3000));
    }

    #[test]
    fn saved_percent_over_total_target() {
        let goals = vec![goal("a", GoalCategory::Savings, dec!(400), dec!(100))];
        assert_eq!(summarize(&goals).saved_percent(), Some(dec!(25)));
    }

    #[test]
    fn huge_totals_saturate_instead_of_overflowing() {
        let goals = vec![
            goal("a", GoalCategory::Travel, Decimal::MAX, Decimal::MAX),
            goal("b", GoalCategory::Travel, Decimal::MAX, dec!(1)),
        ];
        let summary = summarize(&goals);
        assert_eq!(summary.total_target, Decimal::MAX);
        assert_eq!(summary.total_saved, Decimal::MAX);
        assert_eq!(summary.by_category[0].amount, Decimal::MAX);
        assert_eq!(summary.saved_percent(), Some(dec!(100)));
        assert_eq!(saved_by_category(&goals)[0].amount, Decimal::MAX);

        let lopsided = GoalsSummary {
            total_target: dec!(0.01),
            total_saved: Decimal::MAX,
            ..GoalsSummary::default()
        };
        assert_eq!(lopsided.saved_percent(), None);
    }

    #[test]
    fn saved_by_category_skips_empty_groups() {
        let goals = vec![
            goal("a", GoalCategory::Travel, dec!(1000), dec!(0)),
            goal("b", GoalCategory::Savings, dec!(300), dec!(120)),
        ];
        let saved = saved_by_category(&goals);
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].category, GoalCategory::Savings);
        assert_eq!(saved[0].amount, dec!(120));
    }
}
