//! GoalWise AI - free-text goal intake using rig-core.
//!
//! This crate implements the core `GoalParserTrait` against an
//! OpenAI-compatible chat completions endpoint. Everything model-specific
//! (prompting, reply cleanup, normalisation) stays here; the core crate only
//! sees a validated `ParsedGoal` or an upstream error.

pub mod error;
pub mod goal_parser;

pub use error::AiError;
pub use goal_parser::{parse_goal_reply, LlmGoalParser, LlmGoalParserConfig};
