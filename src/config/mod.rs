//! Configuration loaded from `.txvault.toml`.

pub mod settings;

pub use settings::Settings;
