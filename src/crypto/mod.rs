//! Cryptographic primitives for TxVault.
//!
//! This module provides:
//! - AES-256-GCM encryption and decryption with a 16-byte nonce (`encryption`)
//! - PBKDF2-HMAC-SHA256 password-based key derivation (`kdf`)

pub mod encryption;
pub mod kdf;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, derive_key, ...};
pub use encryption::{decrypt, encrypt};
pub use kdf::{derive_key, derive_key_with_params, generate_salt, KdfParams};
