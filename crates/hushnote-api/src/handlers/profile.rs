//! Profile handlers and the profile intent dispatch.
//!
//! The profile screen submits one of a closed set of intents. Each variant
//! carries its own validated payload and dispatch is an exhaustive match:
//! adding a variant without handling it is a compile error, and unknown
//! intents are rejected at deserialization.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AuthSession;
use crate::error::ApiError;
use crate::handlers::pin::VerifyPinResponse;
use crate::AppState;

// =============================================================================
// REQUEST/RESPONSE TYPES
// =============================================================================

/// The closed set of profile-screen intents.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum ProfileIntent {
    UpdateProfile {
        first_name: Option<String>,
        last_name: Option<String>,
        picture_ref: Option<String>,
    },
    ChangePassword {
        current_password: String,
        new_password: String,
        confirm_password: String,
    },
    SetPin {
        pin: String,
    },
    ResetPin {
        current_pin: String,
        new_pin: String,
    },
    VerifyPin {
        pin: String,
    },
    DeleteAccount {
        confirm: String,
    },
}

/// Profile view (the PIN hash itself never leaves the server).
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ProfileResponse {
    pub user_id: Uuid,
    pub pin_set: bool,
    pub picture_ref: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct IntentOutcome {
    pub message: String,
}

// =============================================================================
// HANDLERS
// =============================================================================

/// Fetch the caller's profile.
///
/// GET /api/v1/profile
#[utoipa::path(get, path = "/api/v1/profile", tag = "Profile",
    responses((status = 200, description = "Success", body = ProfileResponse)))]
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthSession,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = state.profiles.fetch(auth.user_id).await?;
    Ok(Json(ProfileResponse {
        user_id: profile.user_id,
        pin_set: profile.pin_set(),
        picture_ref: profile.picture_ref,
    }))
}

/// Dispatch a profile-screen intent.
///
/// POST /api/v1/profile/intent
///
/// PIN intents are handled here; account-management intents belong to the
/// primary account service and answer 501 from this service.
#[utoipa::path(post, path = "/api/v1/profile/intent", tag = "Profile",
    request_body = ProfileIntent,
    responses(
        (status = 200, description = "Intent handled"),
        (status = 501, description = "Intent delegated to the account service")))]
pub async fn profile_intent(
    State(state): State<AppState>,
    auth: AuthSession,
    Json(intent): Json<ProfileIntent>,
) -> Result<Response, ApiError> {
    match intent {
        ProfileIntent::SetPin { pin } => {
            state.gate.set_pin(auth.user_id, &pin).await?;
            Ok(Json(IntentOutcome {
                message: "PIN set successfully.".to_string(),
            })
            .into_response())
        }
        ProfileIntent::ResetPin {
            current_pin,
            new_pin,
        } => {
            state
                .gate
                .reset_pin(auth.user_id, &current_pin, &new_pin)
                .await?;
            Ok(Json(IntentOutcome {
                message: "PIN reset successfully.".to_string(),
            })
            .into_response())
        }
        ProfileIntent::VerifyPin { pin } => {
            let unlocked = state
                .controller
                .unlock_hidden(auth.user_id, &auth.session, &pin)
                .await?;
            if !unlocked {
                return Err(ApiError::Forbidden(
                    "Please enter the correct PIN to view hidden notes.".to_string(),
                ));
            }
            Ok(Json(VerifyPinResponse { unlocked: true }).into_response())
        }
        ProfileIntent::UpdateProfile { .. }
        | ProfileIntent::ChangePassword { .. }
        | ProfileIntent::DeleteAccount { .. } => Err(ApiError::NotImplemented(
            "account management is handled by the primary account service".to_string(),
        )),
    }
}
