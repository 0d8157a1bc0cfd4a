//! git-latest-changes - latest git change per file for documentation pages
//!
//! Replaces a `{{ latest_changes }}` marker in a documentation page with a
//! markdown table listing, for every tracked file, its most recent commit.
//!
//! This library provides:
//! - [`git`]: git command execution and parsing
//! - [`model`]: History entries, table columns, hosting vendors
//! - [`history`]: Latest-change query, ordering and limiting
//! - [`render`]: Markdown table rendering
//! - [`config`]: Configuration loading and validation
//! - [`plugin`]: Host pipeline lifecycle adapter

pub mod config;
pub mod error;
pub mod git;
pub mod history;
pub mod model;
pub mod paths;
pub mod plugin;
pub mod render;
pub mod sanitize;

pub use error::{ConfigError, PluginError};
pub use plugin::{BuildCommand, LatestChangesPlugin, MARKER, Page};
