//! `txvault seal` — encrypt a JSON record into a package file.

use std::io::Read;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::cli::{
    data_dir, default_package_path, load_settings, output, prompt_new_password, record_audit, Cli,
};
use crate::errors::{Result, TxVaultError};
use crate::package::{encrypt_with_params, write_package};

/// Execute the `seal` command.
pub fn execute(cli: &Cli, input: &str, output_path: Option<&str>) -> Result<()> {
    let record = read_record(input)?;

    let settings = load_settings()?;
    let dest = match output_path {
        Some(p) => PathBuf::from(p),
        None => default_package_path(&data_dir(cli)?, input),
    };

    let password = prompt_new_password()?;
    let package = encrypt_with_params(&record, &password, &settings.kdf_params())?;
    write_package(&dest, &package)?;

    record_audit(cli, "seal", &dest, Some(&format!("from {input}")));

    output::success(&format!("Sealed {input} -> {}", dest.display()));
    output::tip("Keep the passphrase safe; the package cannot be opened without it.");
    Ok(())
}

/// Read and parse the JSON record from a file or stdin (`-`).
fn read_record(input: &str) -> Result<Value> {
    let text = if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        let path = Path::new(input);
        if !path.exists() {
            return Err(TxVaultError::CommandFailed(format!(
                "input file not found: {input}"
            )));
        }
        std::fs::read_to_string(path)?
    };

    serde_json::from_str(&text)
        .map_err(|e| TxVaultError::Encoding(format!("{input} is not valid JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn read_record_parses_json_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("r.json");
        std::fs::write(&path, r#"{"amount": 45.99, "merchant": "Target"}"#).unwrap();

        let record = read_record(path.to_str().unwrap()).unwrap();
        assert_eq!(record["merchant"], "Target");
    }

    #[test]
    fn read_record_rejects_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("r.json");
        std::fs::write(&path, "{not json").unwrap();

        let result = read_record(path.to_str().unwrap());
        assert!(matches!(result, Err(TxVaultError::Encoding(_))));
    }

    #[test]
    fn read_record_missing_file() {
        let result = read_record("/definitely/not/here.json");
        assert!(matches!(result, Err(TxVaultError::CommandFailed(_))));
    }
}
