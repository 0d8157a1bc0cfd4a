//! Build-aborting error types
//!
//! Anything that reaches the host as a [`PluginError`] stops the
//! documentation build. Recoverable conditions never take this path; they
//! are logged and skipped in [`crate::history`].

use thiserror::Error;

use crate::git::GitError;

/// Fatal error surfaced to the host pipeline
#[derive(Error, Debug)]
pub enum PluginError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Git error: {0}")]
    Git(#[from] GitError),

    #[error("Failed to process `{file}`: {source}")]
    File {
        file: String,
        #[source]
        source: GitError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Page processed before the plugin was configured")]
    NotConfigured,
}

/// Invalid or unreadable configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid table_features: {invalid}\nValid options are: {valid}")]
    InvalidTableFeatures { invalid: String, valid: String },

    #[error("Invalid timestamp_format '{value}': {reason}")]
    InvalidTimestampFormat { value: String, reason: String },

    #[error("Failed to read config file {path}: {reason}")]
    LoadFailed { path: String, reason: String },

    #[error("Invalid TOML in {path}: {reason}")]
    ParseFailed { path: String, reason: String },
}
