//! # hushnote-crypto
//!
//! Credential hashing for hushnote.
//!
//! This crate provides the Argon2id implementation of the
//! [`PinHasher`](hushnote_core::PinHasher) trait used by the hidden-notes
//! PIN gate.
//!
//! ## Cryptographic Primitives
//!
//! - **Hashing**: Argon2id (memory-hard, GPU/ASIC resistant)
//! - **Salt**: random per hash via the OS CSPRNG
//! - **Storage format**: PHC string (`$argon2id$v=19$m=19456,t=2,p=1$...`)
//! - **Verification**: the `argon2` crate's `PasswordVerifier`, which
//!   compares in constant time internally
//!
//! ## Example
//!
//! ```rust
//! use hushnote_core::PinHasher;
//! use hushnote_crypto::Argon2PinHasher;
//!
//! let hasher = Argon2PinHasher::new();
//! let hash = hasher.hash("123456").unwrap();
//! assert!(hasher.verify("123456", &hash));
//! assert!(!hasher.verify("654321", &hash));
//! ```

pub mod hasher;

pub use hasher::Argon2PinHasher;
