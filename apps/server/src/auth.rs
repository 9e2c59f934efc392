//! Caller identity.
//!
//! Authentication happens upstream; this server trusts the `X-User-Id`
//! header it is handed and rejects requests without one.

use axum::{extract::FromRequestParts, http::request::Parts};
use goalwise_core::identity::UserId;

use crate::error::ApiError;

pub const USER_ID_HEADER: &str = "x-user-id";

/// The user a request acts on behalf of.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserId);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing X-User-Id header".to_string()))?;
        UserId::parse(raw)
            .map(CurrentUser)
            .map_err(|_| ApiError::Unauthorized("Empty X-User-Id header".to_string()))
    }
}
