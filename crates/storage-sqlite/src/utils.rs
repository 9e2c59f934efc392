//! Column conversion helpers shared by the repositories.

use log::warn;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses a decimal stored as TEXT.
///
/// Amounts are written by this crate from `Decimal::to_string`, so a parse
/// failure means the row was edited by hand. It reads as zero and shows up
/// in the ledger consistency check.
pub fn parse_decimal(column: &str, raw: &str) -> Decimal {
    Decimal::from_str(raw).unwrap_or_else(|e| {
        warn!("Unreadable decimal in column {}: '{}' ({})", column, raw, e);
        Decimal::ZERO
    })
}
