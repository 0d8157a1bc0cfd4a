//! History entry data model

use std::path::PathBuf;

use chrono::{DateTime, FixedOffset};

use super::vendor::{RepoUrls, Vendor, build_urls};
use crate::paths;

/// The most recent change of one tracked file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Path relative to the repository root
    pub filepath: String,

    /// Committer timestamp, always with an offset
    pub timestamp: DateTime<FixedOffset>,

    /// Author name, sanitized
    pub author_name: String,

    /// Subject line, sanitized
    pub message: String,

    /// Abbreviated commit hash (prefix of `hash_full`)
    pub hash_short: String,

    /// Full commit hash
    pub hash_full: String,

    /// Hosting vendor, `None` when unknown or unsupported
    pub repo_vendor: Option<Vendor>,

    /// Base URL of the hosted repository, may be empty
    pub repo_url: String,

    /// Branch checked out when the history was queried
    pub branch: String,

    /// Root of the working tree `filepath` is relative to
    pub repo_root: PathBuf,

    /// Absolute path of the page being rendered
    pub local_page_path: PathBuf,
}

impl HistoryEntry {
    /// Commit and file links on the hosting vendor
    pub fn repo_urls(&self) -> RepoUrls {
        build_urls(
            self.repo_vendor,
            &self.repo_url,
            &self.branch,
            &self.hash_full,
            &self.hash_short,
            &self.filepath,
        )
    }

    /// Link from the rendered page to this file, empty if none makes sense
    pub fn file_local_url(&self) -> String {
        paths::relative_link(&self.local_page_path, &self.repo_root.join(&self.filepath))
    }
}
