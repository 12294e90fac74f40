//! Record-level encrypt / decrypt.
//!
//! `encrypt` turns any serializable record into an `EncryptedPackage`:
//! compact JSON -> fresh salt -> PBKDF2 key -> AES-256-GCM.  `decrypt`
//! reverses it and hands back a `serde_json::Value`.  Nothing is kept
//! between calls.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::crypto::encryption;
use crate::crypto::kdf::{self, KdfParams, SALT_LEN};
use crate::errors::{Result, TxVaultError};

use super::format::{EncryptedPackage, CURRENT_VERSION};

/// Encrypt `record` under `passphrase` with default KDF parameters.
pub fn encrypt<T: Serialize + ?Sized>(record: &T, passphrase: &str) -> Result<EncryptedPackage> {
    encrypt_with_params(record, passphrase, &KdfParams::default())
}

/// Encrypt `record` under `passphrase` with explicit KDF parameters.
pub fn encrypt_with_params<T: Serialize + ?Sized>(
    record: &T,
    passphrase: &str,
    params: &KdfParams,
) -> Result<EncryptedPackage> {
    let plaintext = serde_json::to_vec(record)
        .map_err(|e| TxVaultError::Encoding(format!("record is not JSON-serializable: {e}")))?;

    let salt = kdf::generate_salt();
    let key = kdf::derive_key_with_params(passphrase, &salt, params)?;
    let blob = encryption::encrypt(&key[..], &plaintext)?;

    tracing::debug!(
        plaintext_len = plaintext.len(),
        iterations = params.iterations,
        "sealed record"
    );

    Ok(EncryptedPackage {
        v: CURRENT_VERSION,
        encrypted: BASE64.encode(&blob),
        salt: BASE64.encode(salt),
        kdf_iterations: params.iterations,
    })
}

/// Decrypt the two base64 fields of a package with the default KDF cost.
pub fn decrypt(encrypted_b64: &str, salt_b64: &str, passphrase: &str) -> Result<Value> {
    let bytes = open_bytes(encrypted_b64, salt_b64, passphrase, &KdfParams::default())?;
    parse_record(&bytes)
}

/// Decrypt a full package, honouring its stored version and KDF cost.
pub fn decrypt_package(package: &EncryptedPackage, passphrase: &str) -> Result<Value> {
    package.check_version()?;
    let params = KdfParams {
        iterations: package.kdf_iterations,
    };
    let bytes = open_bytes(&package.encrypted, &package.salt, passphrase, &params)?;
    parse_record(&bytes)
}

/// Decrypt a package straight into a typed record.
pub fn decrypt_package_as<T: DeserializeOwned>(
    package: &EncryptedPackage,
    passphrase: &str,
) -> Result<T> {
    let value = decrypt_package(package, passphrase)?;
    serde_json::from_value(value)
        .map_err(|e| TxVaultError::Encoding(format!("record has unexpected shape: {e}")))
}

fn open_bytes(
    encrypted_b64: &str,
    salt_b64: &str,
    passphrase: &str,
    params: &KdfParams,
) -> Result<Vec<u8>> {
    let blob = BASE64
        .decode(encrypted_b64)
        .map_err(|e| TxVaultError::Format(format!("encrypted field is not base64: {e}")))?;
    let salt = BASE64
        .decode(salt_b64)
        .map_err(|e| TxVaultError::Format(format!("salt field is not base64: {e}")))?;

    if salt.len() != SALT_LEN {
        return Err(TxVaultError::Format(format!(
            "salt is {} bytes, expected {SALT_LEN}",
            salt.len()
        )));
    }
    if blob.len() < encryption::OVERHEAD {
        return Err(TxVaultError::Format(format!(
            "encrypted blob is {} bytes, need at least {}",
            blob.len(),
            encryption::OVERHEAD
        )));
    }

    let key = kdf::derive_key_with_params(passphrase, &salt, params)?;
    let plaintext = encryption::decrypt(&key[..], &blob)?;

    tracing::debug!(plaintext_len = plaintext.len(), "opened package");
    Ok(plaintext)
}

fn parse_record(bytes: &[u8]) -> Result<Value> {
    serde_json::from_slice(bytes)
        .map_err(|e| TxVaultError::Encoding(format!("decrypted bytes are not JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn package_carries_version_and_cost() {
        let params = KdfParams {
            iterations: 150_000,
        };
        let pkg = encrypt_with_params(&json!({"k": "v"}), "pw", &params).unwrap();
        assert_eq!(pkg.v, CURRENT_VERSION);
        assert_eq!(pkg.kdf_iterations, 150_000);
        assert_eq!(decrypt_package(&pkg, "pw").unwrap(), json!({"k": "v"}));
    }

    #[test]
    fn weak_params_are_rejected_before_encrypting() {
        let params = KdfParams { iterations: 10 };
        let result = encrypt_with_params(&json!(1), "pw", &params);
        assert!(matches!(result, Err(TxVaultError::KeyDerivation(_))));
    }

    #[test]
    fn wrong_salt_length_is_format_error() {
        let pkg = encrypt(&json!([1, 2, 3]), "pw").unwrap();
        let short_salt = BASE64.encode([0u8; 8]);
        let result = decrypt(&pkg.encrypted, &short_salt, "pw");
        assert!(matches!(result, Err(TxVaultError::Format(_))));
    }

    #[test]
    fn bad_encrypted_base64_is_format_error() {
        let pkg = encrypt(&json!("x"), "pw").unwrap();
        let result = decrypt("***not base64***", &pkg.salt, "pw");
        assert!(matches!(result, Err(TxVaultError::Format(_))));
    }

    #[test]
    fn typed_decrypt_reports_shape_mismatch_as_encoding() {
        let pkg = encrypt(&json!({"amount": "not a number"}), "pw").unwrap();

        #[derive(serde::Deserialize, Debug)]
        struct Purchase {
            #[allow(dead_code)]
            amount: f64,
        }

        let result = decrypt_package_as::<Purchase>(&pkg, "pw");
        assert!(matches!(result, Err(TxVaultError::Encoding(_))));
    }
}
