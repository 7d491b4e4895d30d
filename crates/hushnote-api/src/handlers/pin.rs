//! PIN verification and session lock handlers.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::auth::AuthSession;
use crate::error::ApiError;
use crate::AppState;

/// Body of a PIN verification submission.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct VerifyPinBody {
    pub pin: String,
}

/// Result of a successful PIN verification.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct VerifyPinResponse {
    pub unlocked: bool,
}

/// Verify the submitted PIN and unlock the hidden partition for this
/// session.
///
/// POST /api/v1/pin/verify
///
/// A malformed PIN is a 400 with a field-level message; a wrong PIN is a
/// 403. The two are distinguishable on purpose.
#[utoipa::path(post, path = "/api/v1/pin/verify", tag = "Pin",
    request_body = VerifyPinBody,
    responses(
        (status = 200, description = "Unlocked", body = VerifyPinResponse),
        (status = 400, description = "PIN must be 6 digits"),
        (status = 403, description = "Incorrect PIN")))]
pub async fn verify_pin(
    State(state): State<AppState>,
    auth: AuthSession,
    Json(body): Json<VerifyPinBody>,
) -> Result<Json<VerifyPinResponse>, ApiError> {
    let unlocked = state
        .controller
        .unlock_hidden(auth.user_id, &auth.session, &body.pin)
        .await?;
    if !unlocked {
        return Err(ApiError::Forbidden(
            "Please enter the correct PIN to view hidden notes.".to_string(),
        ));
    }
    Ok(Json(VerifyPinResponse { unlocked: true }))
}

/// Return this session to LOCKED (logout hook).
///
/// POST /api/v1/session/lock
#[utoipa::path(post, path = "/api/v1/session/lock", tag = "Pin",
    responses((status = 204, description = "Locked")))]
pub async fn lock_session(
    State(state): State<AppState>,
    auth: AuthSession,
) -> Result<StatusCode, ApiError> {
    state.controller.lock(&auth.session).await?;
    Ok(StatusCode::NO_CONTENT)
}
