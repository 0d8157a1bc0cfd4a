//! Configuration loading and validation
//!
//! A config file has two optional tables:
//!
//! ```toml
//! [site]
//! repo_url = "https://github.com/ns/proj"
//! docs_dir = "docs"
//!
//! [plugin]
//! history_limit = 10
//! table_features = ["filepath", "timestamp", "message"]
//! ```
//!
//! Everything is validated before any git command runs.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::Column;

/// A strftime directive the format must contain at least once
static TIMESTAMP_DIRECTIVE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"%[aAwdbBmyYHIpMSfzjUWcxX%]").expect("Invalid timestamp directive regex")
});

/// Host-level settings the plugin reads but does not own
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Base URL of the hosted repository
    pub repo_url: Option<String>,

    /// Host's name for the repository (e.g. "GitHub"), used as vendor hint
    pub repo_name: Option<String>,

    /// Documentation source directory
    pub docs_dir: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            repo_url: None,
            repo_name: None,
            docs_dir: PathBuf::from("docs"),
        }
    }
}

impl SiteConfig {
    /// Vendor hint: `repo_name`, or a name derived from well-known hosts
    pub fn vendor_hint(&self) -> String {
        if let Some(name) = self.repo_name.as_deref().filter(|n| !n.trim().is_empty()) {
            return name.to_string();
        }

        let url = self.repo_url.as_deref().unwrap_or_default().to_lowercase();
        let derived = if url.contains("github.com") {
            "GitHub"
        } else if url.contains("gitlab.com") {
            "GitLab"
        } else if url.contains("bitbucket.org") {
            "Bitbucket"
        } else {
            ""
        };
        derived.to_string()
    }
}

/// Plugin options as written in the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PluginConfig {
    /// Only consider files below the docs directory
    pub limit_to_docs_dir: bool,

    /// Hosting vendor; overrides the host's hint when both are set
    pub repo_vendor: String,

    /// Render the table while serving
    pub enabled_on_serve: bool,

    /// Maximum number of entries; `<= 0` means unlimited
    pub history_limit: i64,

    /// strftime-style format for the date column
    pub timestamp_format: String,

    /// Column identifiers, left to right
    pub table_features: Vec<String>,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            limit_to_docs_dir: false,
            repo_vendor: String::new(),
            enabled_on_serve: true,
            history_limit: -1,
            timestamp_format: "%Y-%m-%d %H:%M:%S".to_string(),
            table_features: Column::DEFAULT
                .iter()
                .map(|c| c.as_str().to_string())
                .collect(),
        }
    }
}

/// Validated plugin options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub limit_to_docs_dir: bool,
    pub repo_vendor: String,
    pub history_limit: i64,
    pub timestamp_format: TimestampFormat,
    pub columns: Vec<Column>,
}

impl PluginConfig {
    /// Check every option and convert to typed [`Settings`]
    pub fn validate(&self) -> Result<Settings, ConfigError> {
        let columns = parse_columns(&self.table_features)?;
        let timestamp_format = TimestampFormat::parse(&self.timestamp_format)?;

        Ok(Settings {
            limit_to_docs_dir: self.limit_to_docs_dir,
            repo_vendor: self.repo_vendor.clone(),
            history_limit: self.history_limit,
            timestamp_format,
            columns,
        })
    }
}

/// Resolve configured identifiers, reporting every unknown one at once
pub fn parse_columns(features: &[String]) -> Result<Vec<Column>, ConfigError> {
    let mut columns = Vec::with_capacity(features.len());
    let mut invalid = Vec::new();

    for feature in features {
        match feature.parse::<Column>() {
            Ok(column) => columns.push(column),
            Err(name) => invalid.push(format!("\"{name}\"")),
        }
    }

    if !invalid.is_empty() {
        return Err(ConfigError::InvalidTableFeatures {
            invalid: invalid.join(", "),
            valid: Column::valid_identifiers(),
        });
    }

    Ok(columns)
}

/// A strftime format known to render without error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampFormat(String);

impl TimestampFormat {
    /// Validate a format string
    ///
    /// It must contain at least one recognized directive and every
    /// directive must be understood by chrono.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        if !TIMESTAMP_DIRECTIVE_REGEX.is_match(value) {
            return Err(ConfigError::InvalidTimestampFormat {
                value: value.to_string(),
                reason: "format string does not contain any valid datetime directives".to_string(),
            });
        }

        if StrftimeItems::new(value).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::InvalidTimestampFormat {
                value: value.to_string(),
                reason: "format string contains an unsupported directive".to_string(),
            });
        }

        Ok(Self(value.to_string()))
    }

    /// The format string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Render a timestamp
    pub fn format(&self, timestamp: &DateTime<FixedOffset>) -> String {
        timestamp.format(&self.0).to_string()
    }
}

impl Default for TimestampFormat {
    fn default() -> Self {
        Self("%Y-%m-%d %H:%M:%S".to_string())
    }
}

/// Contents of a config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub site: SiteConfig,
    pub plugin: PluginConfig,
}

impl ConfigFile {
    /// Load a TOML config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let config: ConfigFile =
            toml::from_str(&content).map_err(|e| ConfigError::ParseFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}
