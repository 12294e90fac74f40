//! One module per subcommand.

#[cfg(feature = "audit-log")]
pub mod audit_cmd;
pub mod completions;
pub mod inspect;
pub mod open;
pub mod seal;
pub mod seal_file;
pub mod version;
