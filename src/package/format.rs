//! JSON package format and atomic persistence.
//!
//! A package file looks like this:
//!
//! ```text
//! {
//!   "v": 1,
//!   "encrypted": "<base64: nonce(16) | tag(16) | ciphertext(N)>",
//!   "salt": "<base64: 16 raw bytes>",
//!   "kdf_iterations": 100000
//! }
//! ```
//!
//! - **v**: format version.  Missing means `1` (packages written before
//!   the field existed).
//! - **encrypted**: the AEAD blob produced by `crypto::encrypt`.
//! - **salt**: the PBKDF2 salt.  Not secret.
//! - **kdf_iterations**: PBKDF2 cost used at encryption time.  Missing
//!   means the default of 100 000.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::crypto::kdf::DEFAULT_ITERATIONS;
use crate::errors::{Result, TxVaultError};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Current package format version.
pub const CURRENT_VERSION: u8 = 1;

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

// ---------------------------------------------------------------------------
// EncryptedPackage
// ---------------------------------------------------------------------------

/// The durable artifact produced by `encrypt`.
///
/// Both payload fields are kept as base64 text; they are only decoded
/// inside `decrypt`, which is where malformed input is reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedPackage {
    /// Format version.
    #[serde(default = "default_version")]
    pub v: u8,

    /// base64(nonce || tag || ciphertext).
    pub encrypted: String,

    /// base64(salt).
    pub salt: String,

    /// PBKDF2 iteration count used to derive the key.
    #[serde(default = "default_iterations")]
    pub kdf_iterations: u32,
}

fn default_version() -> u8 {
    CURRENT_VERSION
}

fn default_iterations() -> u32 {
    DEFAULT_ITERATIONS
}

impl EncryptedPackage {
    /// Parse a package from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let package: Self = serde_json::from_str(text)
            .map_err(|e| TxVaultError::Format(format!("package JSON: {e}")))?;
        package.check_version()?;
        Ok(package)
    }

    /// Serialize the package as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| TxVaultError::Encoding(format!("package JSON: {e}")))
    }

    /// Reject versions this build does not understand.
    pub fn check_version(&self) -> Result<()> {
        if self.v != CURRENT_VERSION {
            return Err(TxVaultError::Format(format!(
                "unsupported package version {}, expected {CURRENT_VERSION}",
                self.v
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Write a package file to disk **atomically**.
///
/// The JSON is written to a temp file next to the target and then
/// renamed over it, so readers never see a half-written package.
pub fn write_package(path: &Path, package: &EncryptedPackage) -> Result<()> {
    let mut text = package.to_json_pretty()?;
    text.push('\n');
    write_atomic(path, text.as_bytes())
}

/// Read and parse a package file.
pub fn read_package(path: &Path) -> Result<EncryptedPackage> {
    if !path.exists() {
        return Err(TxVaultError::PackageNotFound(path.to_path_buf()));
    }

    let text = fs::read_to_string(path)?;
    EncryptedPackage::from_json(&text)
}

/// Write `bytes` to `path` via a temp file in the same directory.
///
/// Parent directories are created as needed.  The temp file gets a
/// unique name and is created exclusively, so an existing file or
/// symlink at that name is never written through.  On Unix it is
/// owner-only from the moment it exists.  Contents are synced before
/// the rename.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let tmp_path = temp_path_for(parent, path);
    let mut file = create_private(&tmp_path)?;

    let written = file.write_all(bytes).and_then(|()| file.sync_all());
    drop(file);
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote file atomically");

    Ok(())
}

fn temp_path_for(parent: &Path, target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "txvault-output".into());
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or(0);
    let counter = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);

    parent.join(format!(
        ".{name}.tmp-{}-{nanos}-{counter}",
        std::process::id()
    ))
}

#[cfg(unix)]
fn create_private(path: &Path) -> io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn create_private(path: &Path) -> io::Result<File> {
    OpenOptions::new().write(true).create_new(true).open(path)
}
