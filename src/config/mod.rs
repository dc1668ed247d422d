//! Configuration module for schema-ts.
//!
//! Handles connection strings, generation options, and the settings file.

mod connection;
mod options;
mod settings;

pub use connection::{ConnectionConfig, Driver, PUBLIC_SCHEMA};
pub use options::Options;
pub use settings::{
    expand_env_vars, GenerateSettings, Settings, SettingsError, CONFIG_ENV_VAR, CONFIG_FILE_NAME,
};
