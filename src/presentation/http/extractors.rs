//! Custom Extractors
//!
//! Axum extractors for caller identity.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::shared::error::AppError;

/// Header carrying the id of the user authenticated upstream.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Caller identity forwarded by the authenticating proxy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| AppError::Unauthorized("Missing X-User-Id header".into()))?;

        let user_id = value
            .to_str()
            .ok()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .ok_or_else(|| AppError::Unauthorized("Malformed X-User-Id header".into()))?;

        Ok(AuthUser { user_id })
    }
}
