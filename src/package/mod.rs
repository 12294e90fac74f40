//! Package module — password-protected records at rest.
//!
//! This module provides:
//! - The JSON package format and atomic file persistence (`format`)
//! - Record-level `encrypt` / `decrypt` (`seal`)
//! - Whole-file wrappers (`file`)
//! - Customer export verification and summaries (`record`)

pub mod file;
pub mod format;
pub mod record;
pub mod seal;

// Re-export the most commonly used items.
pub use format::{read_package, write_package, EncryptedPackage};
pub use seal::{decrypt, decrypt_package, decrypt_package_as, encrypt, encrypt_with_params};
