//! Goal intake error types.

use goalwise_core::Error as CoreError;
use thiserror::Error;

/// Errors raised while turning free text into a goal.
#[derive(Debug, Error)]
pub enum AiError {
    /// No API key configured for the completions endpoint.
    #[error("Missing API key for provider {0}")]
    MissingApiKey(String),

    /// Provider error (from rig-core or API).
    #[error("Provider error: {0}")]
    Provider(String),

    /// The model answered, but not with a usable goal.
    #[error("Invalid model response: {0}")]
    InvalidResponse(String),
}

impl AiError {
    /// Create a new provider error.
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    /// Create a new invalid response error.
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            AiError::MissingApiKey(_) => "MISSING_API_KEY",
            AiError::Provider(_) => "PROVIDER_ERROR",
            AiError::InvalidResponse(_) => "INVALID_RESPONSE",
        }
    }
}

/// Every intake failure is an upstream failure from the caller's point of view.
impl From<AiError> for CoreError {
    fn from(err: AiError) -> Self {
        CoreError::Upstream(format!("[{}] {}", err.code(), err))
    }
}
