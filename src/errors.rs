use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in TxVault.
#[derive(Debug, Error)]
pub enum TxVaultError {
    // --- Package errors ---
    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Invalid package format: {0}")]
    Format(String),

    #[error("Decryption failed — wrong passphrase or corrupted data")]
    Authentication,

    #[error("Encryption failed: {0}")]
    Encryption(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("Package not found at {0}")]
    PackageNotFound(PathBuf),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    Config(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Passphrase must be at least {0} characters")]
    PasswordTooShort(usize),

    #[error("Audit error: {0}")]
    Audit(String),
}

/// Stable classification of a [`TxVaultError`], for callers that map
/// failures to their own messages or exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Encoding,
    Format,
    Authentication,
    Encryption,
    KeyDerivation,
    NotFound,
    Config,
    Io,
    Command,
    Audit,
}

impl TxVaultError {
    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Encoding(_) => ErrorKind::Encoding,
            Self::Format(_) => ErrorKind::Format,
            Self::Authentication => ErrorKind::Authentication,
            Self::Encryption(_) => ErrorKind::Encryption,
            Self::KeyDerivation(_) => ErrorKind::KeyDerivation,
            Self::PackageNotFound(_) => ErrorKind::NotFound,
            Self::Config(_) => ErrorKind::Config,
            Self::Io(_) => ErrorKind::Io,
            Self::CommandFailed(_) | Self::PasswordTooShort(_) => ErrorKind::Command,
            Self::Audit(_) => ErrorKind::Audit,
        }
    }
}

/// Convenience type alias for TxVault results.
pub type Result<T> = std::result::Result<T, TxVaultError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_stable() {
        assert_eq!(TxVaultError::Authentication.kind(), ErrorKind::Authentication);
        assert_eq!(
            TxVaultError::Format("bad".into()).kind(),
            ErrorKind::Format
        );
        assert_eq!(
            TxVaultError::Encoding("bad".into()).kind(),
            ErrorKind::Encoding
        );
        assert_eq!(
            TxVaultError::PasswordTooShort(8).kind(),
            ErrorKind::Command
        );
    }

    #[test]
    fn authentication_message_does_not_say_which() {
        let msg = TxVaultError::Authentication.to_string();
        assert!(msg.contains("wrong passphrase or corrupted data"));
    }
}
