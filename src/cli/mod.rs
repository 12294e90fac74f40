//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::{Path, PathBuf};

use clap::Parser;

use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{Result, TxVaultError};

/// Minimum passphrase length for newly sealed packages.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Environment variable checked before prompting for a passphrase.
pub const PASSWORD_ENV: &str = "TXVAULT_PASSWORD";

/// TxVault CLI: password-protected transaction records.
#[derive(Parser)]
#[command(
    name = "txvault",
    about = "Password-protected encryption for customer transaction records",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory for packages and the audit log (default: from .txvault.toml, else encrypted_data)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Encrypt a JSON record into a package
    Seal {
        /// JSON file to encrypt (`-` reads stdin)
        input: String,

        /// Package path (default: <data-dir>/<stem>_encrypted.json)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Decrypt a package back to JSON
    Open {
        /// Package file
        package: String,

        /// Write the record here instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Encrypt any file as a package
    SealFile {
        /// File to encrypt
        input: String,

        /// Package path (default: <data-dir>/<name>.sealed.json)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Decrypt a package produced by `seal-file`
    OpenFile {
        /// Package file
        package: String,

        /// Where to write the recovered file
        #[arg(short, long)]
        output: String,
    },

    /// Decrypt a customer export, verify its shape, and print a summary
    Inspect {
        /// Package file
        package: String,
    },

    /// View the audit log of seal / open operations
    Audit {
        /// Number of entries to show (default: 50)
        #[arg(long, default_value = "50")]
        last: usize,
        /// Show entries since a duration ago (e.g. 7d, 24h, 30m)
        #[arg(long)]
        since: Option<String>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// Show version information
    Version,
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load `.txvault.toml` from the working directory.
pub fn load_settings() -> Result<Settings> {
    let cwd = std::env::current_dir()?;
    Settings::load(&cwd)
}

/// Resolve the data directory: `--data-dir` wins over the config file.
pub fn data_dir(cli: &Cli) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    match &cli.data_dir {
        Some(dir) => Ok(cwd.join(dir)),
        None => Ok(load_settings()?.data_path(&cwd)),
    }
}

/// Get the passphrase for an existing package, trying in order:
/// 1. `TXVAULT_PASSWORD` env var (scripts/CI)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the passphrase is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        return Ok(pw);
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter passphrase")
        .allow_empty_password(true)
        .interact()
        .map_err(|e| TxVaultError::CommandFailed(format!("passphrase prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new passphrase with confirmation (used when sealing).
///
/// Also respects `TXVAULT_PASSWORD`.  Enforces `MIN_PASSWORD_LEN`.
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env() {
        check_new_password(&pw)?;
        return Ok(pw);
    }

    loop {
        let password = dialoguer::Password::new()
            .with_prompt("Choose passphrase")
            .with_confirmation(
                "Confirm passphrase",
                "Passphrases do not match, try again",
            )
            .interact()
            .map_err(|e| TxVaultError::CommandFailed(format!("passphrase prompt: {e}")))?;

        if let Err(e) = check_new_password(&password) {
            output::warning(&format!("{e}. Try again."));
            continue;
        }

        return Ok(Zeroizing::new(password));
    }
}

fn password_from_env() -> Option<Zeroizing<String>> {
    match std::env::var(PASSWORD_ENV) {
        Ok(pw) if !pw.is_empty() => Some(Zeroizing::new(pw)),
        _ => None,
    }
}

/// Passphrase policy for new packages.
pub fn check_new_password(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(TxVaultError::PasswordTooShort(MIN_PASSWORD_LEN));
    }
    Ok(())
}

/// Record an operation in the audit log, if the feature is compiled in.
/// Never fails the calling command.
pub fn record_audit(cli: &Cli, op: &str, target: &Path, details: Option<&str>) {
    #[cfg(feature = "audit-log")]
    crate::audit::log_audit(cli, op, target, details);

    #[cfg(not(feature = "audit-log"))]
    let _ = (cli, op, target, details);
}

/// Default package path for a sealed JSON record.
///
/// Example: `customer_42.json` -> `<data_dir>/customer_42_encrypted.json`
pub fn default_package_path(data_dir: &Path, input: &str) -> PathBuf {
    let stem = if input == "-" {
        "record".to_string()
    } else {
        Path::new(input)
            .file_stem()
            .map_or_else(|| "record".to_string(), |s| s.to_string_lossy().into_owned())
    };
    data_dir.join(format!("{stem}_encrypted.json"))
}

/// Default package path for a sealed file.
///
/// Example: `statement.pdf` -> `<data_dir>/statement.pdf.sealed.json`
pub fn default_sealed_file_path(data_dir: &Path, input: &str) -> PathBuf {
    let name = Path::new(input)
        .file_name()
        .map_or_else(|| "file".to_string(), |s| s.to_string_lossy().into_owned());
    data_dir.join(format!("{name}.sealed.json"))
}
