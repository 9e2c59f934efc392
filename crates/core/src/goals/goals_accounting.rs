//! Goal accounting rules: monthly target, progress and status transitions.
//!
//! These functions are pure. Every code path that writes a goal's status
//! goes through [`status_for`] so the `completed <=> current >= target`
//! invariant has a single definition.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::goals_model::{Goal, GoalStatus};
use crate::constants::{DAYS_PER_MONTH, MAX_AMOUNT};
use crate::errors::{Error, Result, ValidationError};

/// Result of applying a contribution to a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContributionOutcome {
    pub new_current: Decimal,
    pub new_status: GoalStatus,
}

/// Number of months a goal is spread over, never less than one.
pub fn months_until(deadline: NaiveDate, reference_date: NaiveDate) -> i64 {
    let days = (deadline - reference_date).num_days();
    if days <= 0 {
        return 1;
    }
    // ceil(days / 30) for positive days
    ((days + DAYS_PER_MONTH - 1) / DAYS_PER_MONTH).max(1)
}

/// Amount to set aside each month to reach `amount` by `deadline`.
///
/// Past or same-day deadlines use a one month denominator, so the whole
/// amount is due now. No rounding is applied.
pub fn compute_monthly_target(
    amount: Decimal,
    deadline: NaiveDate,
    reference_date: NaiveDate,
) -> Decimal {
    amount / Decimal::from(months_until(deadline, reference_date))
}

/// Percentage of `target` covered by `current`.
pub fn compute_progress_percent(current: Decimal, target: Decimal) -> Result<Decimal> {
    if target <= Decimal::ZERO {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "Target amount must be positive to compute progress, got {}",
            target
        ))));
    }
    current
        .checked_div(target)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or_else(|| {
            Error::Validation(ValidationError::InvalidInput(format!(
                "Progress of {} towards {} is out of range",
                current, target
            )))
        })
}

pub fn status_for(current: Decimal, target: Decimal) -> GoalStatus {
    if current >= target {
        GoalStatus::Completed
    } else {
        GoalStatus::Active
    }
}

/// Computes the goal state after adding `amount` to it.
pub fn apply_contribution(goal: &Goal, amount: Decimal) -> Result<ContributionOutcome> {
    ensure_valid_amount(amount)?;
    let new_current = goal
        .current_amount
        .checked_add(amount)
        .ok_or_else(|| Error::Validation(ValidationError::InvalidAmount(amount.to_string())))?;
    Ok(ContributionOutcome {
        new_current,
        new_status: status_for(new_current, goal.target_amount),
    })
}

/// Parses a user-entered contribution amount.
pub fn parse_contribution_amount(raw: &str) -> Result<Decimal> {
    let trimmed = raw.trim();
    let amount = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| Error::Validation(ValidationError::InvalidAmount(raw.to_string())))?;
    ensure_valid_amount(amount)?;
    Ok(amount)
}

/// Amounts must be positive and no larger than [`MAX_AMOUNT`].
pub fn ensure_valid_amount(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO || amount > MAX_AMOUNT {
        return Err(Error::Validation(ValidationError::InvalidAmount(
            amount.to_string(),
        )));
    }
    Ok(())
}

/// Creation-time checks for a goal.
pub fn validate_new_goal(title: &str, target_amount: Decimal) -> Result<()> {
    if title.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "title".to_string(),
        )));
    }
    if target_amount <= Decimal::ZERO {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "Target amount must be positive, got {}",
            target_amount
        ))));
    }
    if target_amount > MAX_AMOUNT {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "Target amount must not exceed {}, got {}",
            MAX_AMOUNT, target_amount
        ))));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::goals_model::GoalCategory;
    use crate::identity::UserId;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn goal(target: Decimal, current: Decimal) -> Goal {
        let now = date(2026, 1, 1).and_hms_opt(0, 0, 0).unwrap();
        Goal {
            id: "g1".to_string(),
            user_id: UserId::parse("u1").unwrap(),
            title: "Bike".to_string(),
            target_amount: target,
            current_amount: current,
            deadline: date(2026, 6, 30),
            monthly_target: dec!(0),
            category: GoalCategory::Purchase,
            status: status_for(current, target),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn monthly_target_for_six_months() {
        let today = date(2026, 1, 1);
        let deadline = today + chrono::Duration::days(180);
        let monthly = compute_monthly_target(dec!(10000), deadline, today);
        assert_eq!(monthly.round_dp(2), dec!(1666.67));
    }

    #[test]
    fn monthly_target_rounds_partial_months_up() {
        let today = date(2026, 1, 1);
        let deadline = today + chrono::Duration::days(31);
        assert_eq!(months_until(deadline, today), 2);
        assert_eq!(compute_monthly_target(dec!(1000), deadline, today), dec!(500));
    }

    #[test]
    fn past_and_same_day_deadlines_use_one_month() {
        let today = date(2026, 3, 15);
        assert_eq!(months_until(today, today), 1);
        assert_eq!(months_until(date(2025, 1, 1), today), 1);
        assert_eq!(
            compute_monthly_target(dec!(2500), date(2025, 1, 1), today),
            dec!(2500)
        );
    }

    #[test]
    fn progress_rejects_non_positive_target() {
        assert!(compute_progress_percent(dec!(10), dec!(0)).is_err());
        assert!(compute_progress_percent(dec!(10), dec!(-5)).is_err());
        assert_eq!(
            compute_progress_percent(dec!(250), dec!(1000)).unwrap(),
            dec!(25)
        );
    }

    #[test]
    fn contribution_completes_goal() {
        let g = goal(dec!(10000), dec!(0));
        let outcome = apply_contribution(&g, dec!(10000)).unwrap();
        assert_eq!(outcome.new_current, dec!(10000));
        assert_eq!(outcome.new_status, GoalStatus::Completed);
        assert_eq!(
            compute_progress_percent(outcome.new_current, g.target_amount).unwrap(),
            dec!(100)
        );
    }

    #[test]
    fn partial_contribution_keeps_goal_active() {
        let g = goal(dec!(10000), dec!(2000));
        let outcome = apply_contribution(&g, dec!(500)).unwrap();
        assert_eq!(outcome.new_current, dec!(2500));
        assert_eq!(outcome.new_status, GoalStatus::Active);
    }

    #[test]
    fn contribution_rejects_non_positive_amount() {
        let g = goal(dec!(100), dec!(0));
        assert!(apply_contribution(&g, dec!(0)).unwrap_err().is_validation());
        assert!(apply_contribution(&g, dec!(-1)).unwrap_err().is_validation());
    }

    #[test]
    fn progress_does_not_overflow_for_large_amounts() {
        let current = Decimal::from_scientific("1e27").unwrap();
        let target = Decimal::from_scientific("7e28").unwrap();
        let percent = compute_progress_percent(current, target).unwrap();
        assert_eq!(percent.round_dp(4), dec!(1.4286));
        assert!(compute_progress_percent(Decimal::MAX, dec!(0.01)).is_err());
    }

    #[test]
    fn contribution_overflow_is_rejected() {
        let g = goal(Decimal::MAX, Decimal::MAX - dec!(1));
        assert!(apply_contribution(&g, dec!(10)).unwrap_err().is_validation());
        assert!(apply_contribution(&g, Decimal::MAX).unwrap_err().is_validation());
    }

    #[test]
    fn parse_contribution_amount_cases() {
        assert_eq!(parse_contribution_amount(" 5000 ").unwrap(), dec!(5000));
        assert_eq!(parse_contribution_amount("12.50").unwrap(), dec!(12.50));
        assert!(parse_contribution_amount("abc").is_err());
        assert!(parse_contribution_amount("").is_err());
        assert!(parse_contribution_amount("0").is_err());
        assert!(parse_contribution_amount("-20").is_err());
        assert!(parse_contribution_amount("1000000000000000").is_ok());
        assert!(parse_contribution_amount("1000000000000001").is_err());
        assert!(parse_contribution_amount("1e30").is_err());
    }

    #[test]
    fn new_goal_validation() {
        assert!(validate_new_goal("Laptop", dec!(50000)).is_ok());
        assert!(validate_new_goal("  ", dec!(50000)).is_err());
        assert!(validate_new_goal("Laptop", dec!(0)).is_err());
        assert!(validate_new_goal("Laptop", Decimal::MAX).is_err());
    }

    proptest! {
        #[test]
        fn monthly_target_never_exceeds_amount(
            amount in 1i64..10_000_000,
            offset in -3_650i64..3_650,
        ) {
            let today = date(2026, 6, 1);
            let deadline = today + chrono::Duration::days(offset);
            let amount = Decimal::from(amount);
            let monthly = compute_monthly_target(amount, deadline, today);
            prop_assert!(monthly > Decimal::ZERO);
            prop_assert!(monthly <= amount);
            prop_assert!(months_until(deadline, today) >= 1);
        }

        #[test]
        fn status_matches_amounts(current in 0i64..1_000_000, target in 1i64..1_000_000) {
            let status = status_for(Decimal::from(current), Decimal::from(target));
            prop_assert_eq!(status == GoalStatus::Completed, current >= target);
        }
    }
}
