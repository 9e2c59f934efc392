use chrono::{NaiveDate, NaiveDateTime, Utc};

/// Current calendar date in UTC. Monthly targets and deadline labels are
/// computed against this date.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn now_utc() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Whole days from `today` until `deadline`; zero or negative once the
/// deadline has arrived.
pub fn days_remaining(deadline: NaiveDate, today: NaiveDate) -> i64 {
    (deadline - today).num_days()
}
