#[cfg(feature = "audit-log")]
pub mod audit;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod package;

pub use errors::{ErrorKind, Result, TxVaultError};
pub use package::{decrypt, decrypt_package, encrypt, EncryptedPackage};
