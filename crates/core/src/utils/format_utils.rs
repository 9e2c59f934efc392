//! Display formatting for amounts, percentages and dates.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use super::time_utils::days_remaining;

/// Formats an amount as whole rupees with Indian digit grouping,
/// e.g. `₹12,34,567`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = rounded.abs().trunc().to_string();
    format!("{}₹{}", sign, group_indian(&digits))
}

/// Inserts separators after the last three digits, then every two.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// One decimal place, e.g. `42.5%`.
pub fn format_percent(percent: Decimal) -> String {
    format!(
        "{:.1}%",
        percent.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
    )
}

/// `05 Mar` style label used on contribution charts.
pub fn format_day_month(date: NaiveDate) -> String {
    date.format("%d %b").to_string()
}

/// `5 Mar 2026` style label used for deadlines.
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

/// `"12 days left"` or `"Overdue"`.
pub fn describe_deadline(deadline: NaiveDate, today: NaiveDate) -> String {
    match days_remaining(deadline, today) {
        1 => "1 day left".to_string(),
        days if days > 0 => format!("{} days left", days),
        _ => "Overdue".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn currency_uses_indian_grouping() {
        assert_eq!(format_currency(dec!(0)), "₹0");
        assert_eq!(format_currency(dec!(999)), "₹999");
        assert_eq!(format_currency(dec!(1000)), "₹1,000");
        assert_eq!(format_currency(dec!(50000)), "₹50,000");
        assert_eq!(format_currency(dec!(1234567)), "₹12,34,567");
        assert_eq!(format_currency(dec!(1666.666)), "₹1,667");
        assert_eq!(format_currency(dec!(-2500.4)), "-₹2,500");
    }

    #[test]
    fn percent_has_one_decimal() {
        assert_eq!(format_percent(dec!(100)), "100.0%");
        assert_eq!(format_percent(dec!(33.333)), "33.3%");
    }

    #[test]
    fn deadline_descriptions() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let in_days = |d: i64| today + chrono::Duration::days(d);
        assert_eq!(describe_deadline(in_days(12), today), "12 days left");
        assert_eq!(describe_deadline(in_days(1), today), "1 day left");
        assert_eq!(describe_deadline(today, today), "Overdue");
        assert_eq!(describe_deadline(in_days(-3), today), "Overdue");
    }

    #[test]
    fn date_labels() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        assert_eq!(format_day_month(date), "05 Mar");
        assert_eq!(format_long_date(date), "5 Mar 2026");
    }
}
