//! Free-text goal parsing.
//!
//! Sends the user's sentence to a chat completions model with a fixed system
//! prompt and turns the JSON reply into a [`ParsedGoal`]. Any reply that does
//! not carry a title, a positive amount and a real date is rejected rather
//! than patched up.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, warn};
use reqwest::Client as HttpClient;
use rig::{client::CompletionClient, completion::Prompt, providers::openai};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use goalwise_core::goals::{GoalCategory, GoalParserTrait, ParsedGoal};
use goalwise_core::Result;

use crate::error::AiError;

const PROVIDER_ID: &str = "openai";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Connection settings for the completions endpoint.
#[derive(Debug, Clone)]
pub struct LlmGoalParserConfig {
    pub api_key: Option<String>,
    /// Overrides the OpenAI endpoint for compatible providers.
    pub base_url: Option<String>,
    pub model: String,
}

impl Default for LlmGoalParserConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

pub struct LlmGoalParser {
    config: LlmGoalParserConfig,
}

impl LlmGoalParser {
    pub fn new(config: LlmGoalParserConfig) -> Self {
        Self { config }
    }

    pub fn is_configured(&self) -> bool {
        self.config
            .api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty())
    }

    fn create_client(&self) -> std::result::Result<openai::CompletionsClient<HttpClient>, AiError> {
        let key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| AiError::MissingApiKey(PROVIDER_ID.to_string()))?;
        let mut builder = openai::CompletionsClient::<HttpClient>::builder().api_key(key);
        if let Some(url) = &self.config.base_url {
            builder = builder.base_url(url);
        }
        builder
            .build()
            .map_err(|e| AiError::provider(e.to_string()))
    }

    async fn request(&self, input: &str, today: NaiveDate) -> std::result::Result<ParsedGoal, AiError> {
        let client = self.create_client()?;
        debug!("Parsing goal text with model {}", self.config.model);

        let reply = client
            .agent(&self.config.model)
            .preamble(&build_system_prompt(today))
            .temperature(0.0)
            .build()
            .prompt(input)
            .await
            .map_err(|e| AiError::provider(e.to_string()))?;

        parse_goal_reply(&reply)
    }
}

#[async_trait]
impl GoalParserTrait for LlmGoalParser {
    async fn parse_goal(&self, input: &str, today: NaiveDate) -> Result<ParsedGoal> {
        self.request(input, today).await.map_err(|e| {
            warn!("Goal parsing failed: {}", e);
            e.into()
        })
    }
}

/// System prompt for the goal extraction model.
pub fn build_system_prompt(today: NaiveDate) -> String {
    let categories: Vec<&str> = GoalCategory::ALL.iter().map(|c| c.as_str()).collect();
    format!(
        "You are a financial goal parser. Extract structured details from text input:\n\
- title: short goal name\n\
- amount: numeric (convert words like \"fifty thousand\" to number)\n\
- deadline: ISO date (YYYY-MM-DD)\n\
- category: one of [{}]\n\n\
Return only valid JSON with: {{ \"title\": \"\", \"amount\": 0, \"deadline\": \"\", \"category\": \"\" }}.\n\
If the deadline is relative (\"in 6 months\", \"by June\"), resolve it against the current date.\n\
Current date: {}",
        categories.join(", "),
        today.format("%Y-%m-%d")
    )
}

#[derive(Debug, Deserialize)]
struct RawGoalReply {
    title: Option<String>,
    #[serde(default)]
    amount: Value,
    deadline: Option<String>,
    category: Option<String>,
}

/// Removes a surrounding markdown code fence, if any.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the language tag on the opening fence line
    let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
    body.trim_end().trim_end_matches("```").trim()
}

fn parse_amount(value: &Value) -> std::result::Result<Decimal, AiError> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.replace([',', '_', ' '], ""),
        other => {
            return Err(AiError::invalid_response(format!(
                "amount is not a number: {}",
                other
            )))
        }
    };
    let amount = Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| AiError::invalid_response(format!("amount '{}' is not a number", text)))?;
    if amount <= Decimal::ZERO {
        return Err(AiError::invalid_response(format!(
            "amount must be positive, got {}",
            amount
        )));
    }
    Ok(amount)
}

/// Turns a raw model reply into a [`ParsedGoal`].
pub fn parse_goal_reply(raw: &str) -> std::result::Result<ParsedGoal, AiError> {
    let json = strip_code_fence(raw);
    let reply: RawGoalReply = serde_json::from_str(json)
        .map_err(|e| AiError::invalid_response(format!("reply is not goal JSON: {}", e)))?;

    let title = reply
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AiError::invalid_response("title is missing"))?;

    let amount = parse_amount(&reply.amount)?;

    let deadline_raw = reply
        .deadline
        .ok_or_else(|| AiError::invalid_response("deadline is missing"))?;
    let deadline = NaiveDate::parse_from_str(deadline_raw.trim(), "%Y-%m-%d").map_err(|_| {
        AiError::invalid_response(format!("deadline '{}' is not YYYY-MM-DD", deadline_raw))
    })?;

    let category = reply
        .category
        .as_deref()
        .and_then(|c| GoalCategory::from_str(c).ok())
        .unwrap_or(GoalCategory::Other);

    Ok(ParsedGoal {
        title,
        amount,
        deadline,
        category,
    })
}
