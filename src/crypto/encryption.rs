//! AES-256-GCM authenticated encryption with a 128-bit nonce.
//!
//! Each call to `encrypt` generates a fresh random 16-byte nonce.  The
//! tag is produced detached and placed between the nonce and the
//! ciphertext, so the ciphertext keeps the plaintext's exact length.
//!
//! Layout of the returned byte buffer:
//!   [ 16-byte nonce | 16-byte auth tag | ciphertext ]

use aes_gcm::aead::consts::U16;
use aes_gcm::aead::{AeadCore, AeadInPlace, KeyInit, OsRng};
use aes_gcm::aes::Aes256;
use aes_gcm::{AesGcm, Nonce, Tag};

use crate::errors::{Result, TxVaultError};

/// AES-256-GCM instantiated with a 16-byte nonce.
type Aes256Gcm16 = AesGcm<Aes256, U16>;

/// Size of the nonce in bytes.
pub const NONCE_LEN: usize = 16;

/// Size of the GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// Bytes that precede the ciphertext in every blob.
pub const OVERHEAD: usize = NONCE_LEN + TAG_LEN;

/// Encrypt `plaintext` with a 32-byte `key`.
///
/// Returns `nonce || tag || ciphertext`.
pub fn encrypt(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm16::new_from_slice(key)
        .map_err(|e| TxVaultError::Encryption(format!("invalid key length: {e}")))?;

    let nonce = Aes256Gcm16::generate_nonce(&mut OsRng);

    let mut buffer = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(&nonce, b"", &mut buffer)
        .map_err(|e| TxVaultError::Encryption(format!("encryption error: {e}")))?;

    let mut output = Vec::with_capacity(OVERHEAD + buffer.len());
    output.extend_from_slice(&nonce);
    output.extend_from_slice(&tag);
    output.extend_from_slice(&buffer);
    Ok(output)
}

/// Decrypt a blob produced by `encrypt`.
///
/// A blob too short to hold a nonce and tag is a format error.  Any tag
/// mismatch (wrong key or modified bytes) is an authentication error;
/// the two causes are never told apart.
pub fn decrypt(key: &[u8], blob: &[u8]) -> Result<Vec<u8>> {
    if blob.len() < OVERHEAD {
        return Err(TxVaultError::Format(format!(
            "encrypted blob is {} bytes, need at least {OVERHEAD}",
            blob.len()
        )));
    }

    let (nonce_bytes, rest) = blob.split_at(NONCE_LEN);
    let (tag_bytes, ciphertext) = rest.split_at(TAG_LEN);
    let nonce = Nonce::<U16>::from_slice(nonce_bytes);
    let tag = Tag::<U16>::from_slice(tag_bytes);

    let cipher = Aes256Gcm16::new_from_slice(key)
        .map_err(|e| TxVaultError::Encryption(format!("invalid key length: {e}")))?;

    let mut buffer = ciphertext.to_vec();
    cipher
        .decrypt_in_place_detached(nonce, b"", &mut buffer, tag)
        .map_err(|_| TxVaultError::Authentication)?;

    Ok(buffer)
}
