//! Explicit user identity.
//!
//! Every data-access, aggregation and orchestration call takes a [`UserId`]
//! instead of reading the authenticated user from ambient state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// Identifier of the account that owns goals, contributions and a profile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Builds a user id, rejecting blank values.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "userId".to_string(),
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Wraps an id read back from storage, where it was validated on insert.
    pub fn from_stored(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
