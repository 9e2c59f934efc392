use rust_decimal::Decimal;

/// Number of days counted as one month when spreading a goal over its deadline
pub const DAYS_PER_MONTH: i64 = 30;

/// Default number of entries in the contribution history
pub const DEFAULT_RECENT_HISTORY_LIMIT: i64 = 10;

/// Upper bound for a single contribution history request
pub const MAX_RECENT_HISTORY_LIMIT: i64 = 100;

/// Largest goal target or single contribution accepted (10^15)
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn max_amount_is_one_quadrillion() {
        assert_eq!(MAX_AMOUNT, dec!(1_000_000_000_000_000));
    }
}
