//! PIN hashing and verification — Argon2id.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tracing::warn;

use hushnote_core::{Error, PinHasher, Result};

/// Argon2id hasher for the 6-digit secondary credential.
///
/// Uses the `argon2` crate's default (memory-hard) parameters and a fresh
/// random salt per hash, producing PHC-format strings for storage in the
/// profile's `pin_hash` column.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2PinHasher;

impl Argon2PinHasher {
    /// Create a hasher with the default Argon2id parameters.
    pub fn new() -> Self {
        Self
    }
}

impl PinHasher for Argon2PinHasher {
    fn hash(&self, raw: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(raw.as_bytes(), &salt)
            .map_err(|e| Error::Crypto(format!("failed to hash PIN: {e}")))?;
        Ok(hash.to_string())
    }

    fn verify(&self, raw: &str, hash: &str) -> bool {
        let parsed = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                // A stored hash that cannot be parsed can never match.
                warn!(
                    subsystem = "crypto",
                    component = "pin_hasher",
                    error = %e,
                    "Stored PIN hash is not a valid PHC string"
                );
                return false;
            }
        };
        Argon2::default()
            .verify_password(raw.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_produces_phc_string() {
        let hasher = Argon2PinHasher::new();
        let hash = hasher.hash("123456").unwrap();
        assert!(hash.starts_with("$argon2id$"));
    }

    #[test]
    fn test_round_trip_verify() {
        let hasher = Argon2PinHasher::new();
        let hash = hasher.hash("123456").unwrap();
        assert!(hasher.verify("123456", &hash));
    }

    #[test]
    fn test_wrong_pin_fails_verify() {
        let hasher = Argon2PinHasher::new();
        let hash = hasher.hash("123456").unwrap();
        assert!(!hasher.verify("123457", &hash));
        assert!(!hasher.verify("", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let hasher = Argon2PinHasher::new();
        let a = hasher.hash("123456").unwrap();
        let b = hasher.hash("123456").unwrap();
        assert_ne!(a, b);
        assert!(hasher.verify("123456", &a));
        assert!(hasher.verify("123456", &b));
    }

    #[test]
    fn test_malformed_stored_hash_never_matches() {
        let hasher = Argon2PinHasher::new();
        assert!(!hasher.verify("123456", "not-a-phc-string"));
        assert!(!hasher.verify("123456", ""));
    }

    #[test]
    fn test_plaintext_never_appears_in_hash() {
        let hasher = Argon2PinHasher::new();
        let hash = hasher.hash("123456").unwrap();
        assert!(!hash.contains("123456"));
    }
}
