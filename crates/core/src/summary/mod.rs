//! Goal aggregator - portfolio totals over a user's goal set.

mod summary_calculator;
mod summary_model;

pub use summary_calculator::{saved_by_category, summarize};
pub use summary_model::{CategoryTotal, GoalsSummary};
