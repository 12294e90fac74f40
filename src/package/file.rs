//! Whole-file wrappers around `seal`.
//!
//! A file is sealed as the one-field record `{"data": "<base64 bytes>"}`
//! and written out as a package JSON file.  Opening reverses both steps.
//! Both directions write their output atomically.

use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::{json, Value};

use crate::crypto::kdf::KdfParams;
use crate::errors::{Result, TxVaultError};

use super::format::{read_package, write_atomic, write_package, EncryptedPackage};
use super::seal;

/// Name of the record field that carries the file contents.
pub const DATA_FIELD: &str = "data";

/// Encrypt the raw bytes of `input` into a package file at `output`.
pub fn encrypt_file(
    input: &Path,
    output: &Path,
    passphrase: &str,
    params: &KdfParams,
) -> Result<EncryptedPackage> {
    let bytes = fs::read(input)?;
    let record = json!({ DATA_FIELD: BASE64.encode(&bytes) });

    let package = seal::encrypt_with_params(&record, passphrase, params)?;
    write_package(output, &package)?;

    tracing::debug!(
        input = %input.display(),
        output = %output.display(),
        bytes = bytes.len(),
        "sealed file"
    );
    Ok(package)
}

/// Decrypt the package file at `input` and write the original bytes to
/// `output`.  Returns the number of bytes written.
pub fn decrypt_file(input: &Path, output: &Path, passphrase: &str) -> Result<usize> {
    let package = read_package(input)?;
    let record = seal::decrypt_package(&package, passphrase)?;
    let bytes = file_bytes(&record)?;

    write_atomic(output, &bytes)?;

    tracing::debug!(
        input = %input.display(),
        output = %output.display(),
        bytes = bytes.len(),
        "opened file"
    );
    Ok(bytes.len())
}

fn file_bytes(record: &Value) -> Result<Vec<u8>> {
    let encoded = record
        .get(DATA_FIELD)
        .and_then(Value::as_str)
        .ok_or_else(|| {
            TxVaultError::Encoding(format!(
                "record has no string `{DATA_FIELD}` field — not a sealed file"
            ))
        })?;

    BASE64
        .decode(encoded)
        .map_err(|e| TxVaultError::Format(format!("file data is not base64: {e}")))
}
