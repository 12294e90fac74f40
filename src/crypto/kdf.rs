//! Password-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! The iteration count is the only tunable.  It is stored in every
//! package so the exact same cost is used when the package is opened,
//! and it can be raised (never lowered below `MIN_ITERATIONS`) via
//! `.txvault.toml`.

use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::errors::{Result, TxVaultError};

/// Length of the salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// Iteration count used when nothing else is configured.
pub const DEFAULT_ITERATIONS: u32 = 100_000;

/// Lowest iteration count accepted from configuration or a package.
pub const MIN_ITERATIONS: u32 = 100_000;

/// Highest iteration count accepted from configuration or a package.
///
/// A package can claim any `u32`; this caps the work a corrupted file
/// can force before it is rejected.
pub const MAX_ITERATIONS: u32 = 10_000_000;

/// Configurable PBKDF2 parameters.
///
/// Maps 1:1 to `Settings::kdf_iterations`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// Number of HMAC-SHA256 iterations (default: 100 000).
    pub iterations: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

/// Derive a 32-byte key from a passphrase and salt with the default
/// iteration count.
///
/// Deterministic and infallible.  An empty passphrase is accepted;
/// passphrase policy belongs to the caller.
pub fn derive_key(passphrase: &str, salt: &[u8]) -> Zeroizing<[u8; KEY_LEN]> {
    pbkdf2_into(passphrase.as_bytes(), salt, DEFAULT_ITERATIONS)
}

/// Derive a 32-byte key with explicit parameters.
///
/// Rejects iteration counts below `MIN_ITERATIONS` so a config file or
/// a crafted package cannot silently weaken the KDF, and counts above
/// `MAX_ITERATIONS` so it cannot stall the caller either.
pub fn derive_key_with_params(
    passphrase: &str,
    salt: &[u8],
    params: &KdfParams,
) -> Result<Zeroizing<[u8; KEY_LEN]>> {
    if params.iterations < MIN_ITERATIONS {
        return Err(TxVaultError::KeyDerivation(format!(
            "PBKDF2 iterations must be at least {MIN_ITERATIONS} (got {})",
            params.iterations
        )));
    }
    if params.iterations > MAX_ITERATIONS {
        return Err(TxVaultError::KeyDerivation(format!(
            "PBKDF2 iterations must be at most {MAX_ITERATIONS} (got {})",
            params.iterations
        )));
    }

    Ok(pbkdf2_into(passphrase.as_bytes(), salt, params.iterations))
}

fn pbkdf2_into(password: &[u8], salt: &[u8], iterations: u32) -> Zeroizing<[u8; KEY_LEN]> {
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut key[..]);
    key
}

/// Generate a cryptographically random 16-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    salt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_match_constant() {
        assert_eq!(KdfParams::default().iterations, DEFAULT_ITERATIONS);
    }

    #[test]
    fn rejects_weak_iteration_count() {
        let params = KdfParams { iterations: 1_000 };
        let result = derive_key_with_params("pw", &[0u8; SALT_LEN], &params);
        assert!(matches!(result, Err(TxVaultError::KeyDerivation(_))));
    }

    #[test]
    fn rejects_excessive_iteration_count() {
        let params = KdfParams {
            iterations: u32::MAX,
        };
        let result = derive_key_with_params("pw", &[0u8; SALT_LEN], &params);
        assert!(matches!(result, Err(TxVaultError::KeyDerivation(_))));

        let just_over = KdfParams {
            iterations: MAX_ITERATIONS + 1,
        };
        let result = derive_key_with_params("pw", &[0u8; SALT_LEN], &just_over);
        assert!(matches!(result, Err(TxVaultError::KeyDerivation(_))));
    }

    #[test]
    fn explicit_default_params_match_derive_key() {
        let salt = [7u8; SALT_LEN];
        let a = derive_key("hunter2", &salt);
        let b = derive_key_with_params("hunter2", &salt, &KdfParams::default()).unwrap();
        assert_eq!(*a, *b);
    }

    #[test]
    fn matches_known_pbkdf2_sha256_vector() {
        // RFC 7914 §11 PBKDF2-HMAC-SHA256 vector, truncated to 32 bytes
        // (c = 1 is below MIN_ITERATIONS, so go through the inner helper).
        let key = pbkdf2_into(b"passwd", b"salt", 1);
        assert_eq!(
            key[..8],
            [0x55, 0xac, 0x04, 0x6e, 0x56, 0xe3, 0x08, 0x9f]
        );
    }

    #[test]
    fn generate_salt_is_random() {
        assert_ne!(generate_salt(), generate_salt());
    }
}
