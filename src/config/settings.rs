use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::kdf::{KdfParams, DEFAULT_ITERATIONS};
use crate::errors::{Result, TxVaultError};

/// Project-level configuration, loaded from `.txvault.toml`.
///
/// Every field has a sensible default so TxVault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory (relative to the working directory) where packages and
    /// the audit log are stored.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// PBKDF2 iteration count for new packages (default: 100 000).
    #[serde(default = "default_kdf_iterations")]
    pub kdf_iterations: u32,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_data_dir() -> String {
    "encrypted_data".to_string()
}

fn default_kdf_iterations() -> u32 {
    DEFAULT_ITERATIONS
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            kdf_iterations: default_kdf_iterations(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".txvault.toml";

    /// Load settings from `<project_dir>/.txvault.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            TxVaultError::Config(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Absolute data directory for a given project root.
    pub fn data_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.data_dir)
    }

    /// Convert the KDF settings into crypto-layer params.
    pub fn kdf_params(&self) -> KdfParams {
        KdfParams {
            iterations: self.kdf_iterations,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
