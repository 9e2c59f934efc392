//! Request and response bodies that differ from the core models.

use chrono::NaiveDate;
use goalwise_core::{
    contributions::LedgerDiscrepancy,
    goals::{GoalCategory, NewGoal},
    profiles::{Profile, ProfileUpdate},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGoalRequest {
    pub title: String,
    #[schema(value_type = f64)]
    pub target_amount: Decimal,
    pub deadline: NaiveDate,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub category: GoalCategory,
}

impl From<CreateGoalRequest> for NewGoal {
    fn from(req: CreateGoalRequest) -> Self {
        NewGoal {
            title: req.title,
            target_amount: req.target_amount,
            deadline: req.deadline,
            category: req.category,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ParseGoalRequest {
    pub text: String,
}

/// Amounts arrive as typed by the user, but a bare JSON number is accepted too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Text(String),
    Number(serde_json::Number),
}

impl AmountInput {
    pub fn as_raw(&self) -> String {
        match self {
            AmountInput::Text(text) => text.clone(),
            AmountInput::Number(number) => number.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddContributionRequest {
    #[schema(value_type = String)]
    pub amount: AmountInput,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRequest {
    pub full_name: Option<String>,
}

impl From<ProfileUpdateRequest> for ProfileUpdate {
    fn from(req: ProfileUpdateRequest) -> Self {
        ProfileUpdate {
            full_name: req.full_name,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub profile: Profile,
    pub initials: String,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        let initials = profile.initials();
        Self { profile, initials }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerReport {
    pub consistent: bool,
    pub discrepancies: Vec<LedgerDiscrepancy>,
}
