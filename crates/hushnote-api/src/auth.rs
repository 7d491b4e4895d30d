//! Request identity extraction.
//!
//! Primary authentication is an external collaborator: the fronting auth
//! layer resolves the user's login session and injects `X-User-Id` and
//! `X-Session-Id` headers before requests reach this service. This
//! extractor surfaces them; requests without both valid headers are
//! rejected with 401.

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use hushnote_core::SessionId;

use crate::error::ApiError;

/// Header carrying the authenticated user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Header carrying the primary-auth session id.
pub const SESSION_ID_HEADER: &str = "x-session-id";

/// The authenticated identity attached to a request.
#[derive(Debug, Clone, Copy)]
pub struct AuthSession {
    pub user_id: Uuid,
    pub session: SessionId,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthSession
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = header_uuid(parts, USER_ID_HEADER)?;
        let session = header_uuid(parts, SESSION_ID_HEADER)?;
        Ok(AuthSession {
            user_id,
            session: SessionId(session),
        })
    }
}

fn header_uuid(parts: &Parts, name: &str) -> Result<Uuid, ApiError> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| {
            ApiError::Unauthorized("missing or invalid authentication headers".to_string())
        })
}
