//! `txvault open` — decrypt a package back to JSON.
//!
//! Prints the record to stdout, or writes it to `--output`.

use std::path::Path;

use crate::cli::{output, prompt_password, record_audit, Cli};
use crate::errors::{Result, TxVaultError};
use crate::package::format::write_atomic;
use crate::package::{decrypt_package, read_package};

/// Execute the `open` command.
pub fn execute(cli: &Cli, package_path: &str, output_path: Option<&str>) -> Result<()> {
    if let Some(dest) = output_path {
        refuse_package_target(dest)?;
    }

    let path = Path::new(package_path);
    let package = read_package(path)?;
    let password = prompt_password()?;
    let record = decrypt_package(&package, &password)?;

    let mut text = serde_json::to_string_pretty(&record)
        .map_err(|e| TxVaultError::Encoding(format!("record JSON: {e}")))?;
    text.push('\n');

    match output_path {
        Some(dest) => {
            write_atomic(Path::new(dest), text.as_bytes())?;
            record_audit(cli, "open", path, None);
            output::success(&format!("Decrypted {package_path} -> {dest}"));
        }
        None => {
            print!("{text}");
            record_audit(cli, "open", path, None);
        }
    }

    Ok(())
}

/// Writing plaintext over a package would destroy it.
fn refuse_package_target(dest: &str) -> Result<()> {
    if dest.ends_with("_encrypted.json") || dest.ends_with(".sealed.json") {
        return Err(TxVaultError::CommandFailed(
            "refusing to write decrypted output over a package file".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refuses_package_like_targets() {
        assert!(refuse_package_target("customer_1_encrypted.json").is_err());
        assert!(refuse_package_target("notes.txt.sealed.json").is_err());
        assert!(refuse_package_target("customer_1_decrypted.json").is_ok());
    }
}
