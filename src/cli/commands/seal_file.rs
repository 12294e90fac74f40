//! `txvault seal-file` / `txvault open-file` — whole-file packages.

use std::path::{Path, PathBuf};

use crate::cli::{
    data_dir, default_sealed_file_path, load_settings, output, prompt_new_password,
    prompt_password, record_audit, Cli,
};
use crate::errors::{Result, TxVaultError};
use crate::package::file::{decrypt_file, encrypt_file};

/// Execute the `seal-file` command.
pub fn execute_seal(cli: &Cli, input: &str, output_path: Option<&str>) -> Result<()> {
    let src = Path::new(input);
    if !src.is_file() {
        return Err(TxVaultError::CommandFailed(format!(
            "input file not found: {input}"
        )));
    }

    let settings = load_settings()?;
    let dest = match output_path {
        Some(p) => PathBuf::from(p),
        None => default_sealed_file_path(&data_dir(cli)?, input),
    };

    let password = prompt_new_password()?;
    encrypt_file(src, &dest, &password, &settings.kdf_params())?;

    record_audit(cli, "seal-file", &dest, Some(&format!("from {input}")));
    output::success(&format!("Sealed {input} -> {}", dest.display()));
    Ok(())
}

/// Execute the `open-file` command.
pub fn execute_open(cli: &Cli, package_path: &str, output_path: &str) -> Result<()> {
    let src = Path::new(package_path);
    let dest = Path::new(output_path);
    if src == dest {
        return Err(TxVaultError::CommandFailed(
            "output must differ from the package path".into(),
        ));
    }

    let password = prompt_password()?;
    let written = decrypt_file(src, dest, &password)?;

    record_audit(cli, "open-file", src, Some(&format!("{written} bytes")));
    output::success(&format!(
        "Decrypted {package_path} -> {output_path} ({written} bytes)"
    ));
    Ok(())
}
