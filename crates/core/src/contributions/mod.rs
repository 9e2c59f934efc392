//! Contribution ledger - append-only log of deposits per goal.

mod contributions_model;
mod contributions_service;
mod contributions_traits;


pub use contributions_model::{
    Contribution, ContributionPoint, ContributionReceipt, ContributionWithGoal, GoalLedgerTotal,
    LedgerDiscrepancy, NewContribution, SortOrder,
};
pub use contributions_service::ContributionService;
pub use contributions_traits::{ContributionRepositoryTrait, ContributionServiceTrait};
