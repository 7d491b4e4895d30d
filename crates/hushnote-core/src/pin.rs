//! The hidden-notes PIN gate.
//!
//! A stateless verifier over persisted credential material: the gate checks
//! submitted PINs against the hashed PIN in the owner's profile and manages
//! setting/resetting that hash. It holds no session state; on successful
//! verification the caller flips the session's unlock flag.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::defaults::PIN_LENGTH;
use crate::error::{Error, Result};
use crate::traits::{PinHasher, ProfileRepository};

/// Validate PIN shape: exactly 6 ASCII digits.
///
/// Malformed input is a client validation failure, distinct from an
/// authentication mismatch.
pub fn validate_pin(raw: &str) -> Result<()> {
    if raw.len() != PIN_LENGTH || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::Validation("PIN must be 6 digits".to_string()));
    }
    Ok(())
}

/// Gate for entry into the hidden-notes partition.
pub struct PinGate {
    hasher: Arc<dyn PinHasher>,
    profiles: Arc<dyn ProfileRepository>,
}

impl PinGate {
    /// Create a gate over a credential hasher and profile store.
    pub fn new(hasher: Arc<dyn PinHasher>, profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { hasher, profiles }
    }

    /// Set (or overwrite) the user's PIN.
    ///
    /// The initial set requires no old PIN; re-setting overwrites the
    /// previous hash unconditionally.
    pub async fn set_pin(&self, user_id: Uuid, raw: &str) -> Result<()> {
        validate_pin(raw)?;
        let hash = self.hasher.hash(raw)?;
        self.profiles.set_pin_hash(user_id, &hash).await?;
        debug!(
            subsystem = "core",
            component = "pin_gate",
            op = "set_pin",
            user_id = %user_id,
            "PIN set"
        );
        Ok(())
    }

    /// Replace the user's PIN after confirming the current one.
    ///
    /// Requires a PIN to already be set; the write is a compare-and-swap
    /// against the hash that was read, so a concurrent reset that wins the
    /// race surfaces here as an authentication failure rather than a silent
    /// lost update.
    pub async fn reset_pin(&self, user_id: Uuid, current: &str, new: &str) -> Result<()> {
        validate_pin(new)?;

        let profile = self.profiles.fetch(user_id).await?;
        let stored = profile
            .pin_hash
            .ok_or_else(|| Error::AuthFailed("current PIN is incorrect".to_string()))?;

        if !self.hasher.verify(current, &stored) {
            return Err(Error::AuthFailed("current PIN is incorrect".to_string()));
        }

        let new_hash = self.hasher.hash(new)?;
        let swapped = self
            .profiles
            .replace_pin_hash(user_id, &stored, &new_hash)
            .await?;
        if !swapped {
            return Err(Error::AuthFailed("current PIN is incorrect".to_string()));
        }

        debug!(
            subsystem = "core",
            component = "pin_gate",
            op = "reset_pin",
            user_id = %user_id,
            "PIN reset"
        );
        Ok(())
    }

    /// Verify a submitted PIN.
    ///
    /// Returns `Ok(true)` iff a hash exists and the PIN matches it under the
    /// hasher. A mismatch (including "no PIN ever set") is a normal
    /// negative result, not a fault; only malformed input raises.
    pub async fn verify(&self, user_id: Uuid, raw: &str) -> Result<bool> {
        validate_pin(raw)?;
        let profile = self.profiles.fetch(user_id).await?;
        Ok(match profile.pin_hash {
            Some(hash) => self.hasher.verify(raw, &hash),
            None => false,
        })
    }
}
