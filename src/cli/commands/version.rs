//! `txvault version` — display version and package format details.

use console::style;

use crate::crypto::kdf::DEFAULT_ITERATIONS;
use crate::errors::Result;
use crate::package::format::CURRENT_VERSION;

/// Execute the `version` command.
pub fn execute() -> Result<()> {
    let current = env!("CARGO_PKG_VERSION");
    println!("txvault {current}");
    println!(
        "{} v{CURRENT_VERSION} (AES-256-GCM, PBKDF2-HMAC-SHA256, {DEFAULT_ITERATIONS} iterations by default)",
        style("package format").dim()
    );
    Ok(())
}
