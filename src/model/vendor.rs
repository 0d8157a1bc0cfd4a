//! Hosting vendor registry
//!
//! Each supported vendor knows how to build a commit URL and a file URL from
//! the repository base URL.

use std::fmt;
use std::str::FromStr;

/// A supported repository hosting vendor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vendor {
    /// `{repo_url}/commit/{hash}`, `{repo_url}/blob/{branch}/{path}`
    GitHub,
    /// `{repo_url}/-/commit/{hash}`, `{repo_url}/-/blob/{branch}/{path}`
    GitLab,
    /// `{repo_url}/commit/{hash}`, `{repo_url}/src/branch/{branch}/{path}`
    Gitea,
    /// `{repo_url}/commits/{hash}`, `{repo_url}/browse/{path}?at={branch}`
    Bitbucket,
}

impl Vendor {
    /// Every supported vendor, in display order
    pub const ALL: [Vendor; 4] = [
        Vendor::GitHub,
        Vendor::GitLab,
        Vendor::Gitea,
        Vendor::Bitbucket,
    ];

    /// Lowercase identifier used in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            Vendor::GitHub => "github",
            Vendor::GitLab => "gitlab",
            Vendor::Gitea => "gitea",
            Vendor::Bitbucket => "bitbucket",
        }
    }

    /// URL of a single commit
    pub fn commit_url(&self, repo_url: &str, commit_hash: &str) -> String {
        let repo_url = repo_url.trim_end_matches('/');
        match self {
            Vendor::GitHub | Vendor::Gitea => format!("{repo_url}/commit/{commit_hash}"),
            Vendor::GitLab => format!("{repo_url}/-/commit/{commit_hash}"),
            Vendor::Bitbucket => format!("{repo_url}/commits/{commit_hash}"),
        }
    }

    /// URL of a file on a branch
    pub fn file_url(&self, repo_url: &str, branch: &str, filepath: &str) -> String {
        let repo_url = repo_url.trim_end_matches('/');
        match self {
            Vendor::GitHub => format!("{repo_url}/blob/{branch}/{filepath}"),
            Vendor::GitLab => format!("{repo_url}/-/blob/{branch}/{filepath}"),
            Vendor::Gitea => format!("{repo_url}/src/branch/{branch}/{filepath}"),
            Vendor::Bitbucket => format!("{repo_url}/browse/{filepath}?at={branch}"),
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a vendor name is not in the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVendor(pub String);

impl FromStr for Vendor {
    type Err = UnknownVendor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Vendor::ALL
            .into_iter()
            .find(|vendor| vendor.as_str() == name)
            .ok_or(UnknownVendor(name))
    }
}

/// Comma-separated list of supported vendor names
pub fn supported_vendors() -> String {
    Vendor::ALL
        .iter()
        .map(|v| format!("'{}'", v.as_str()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Pick the vendor from the configured value and the host's hint
///
/// The configured vendor wins over the discovered one. Names outside the
/// registry resolve to `None`, which leaves hashes and paths unlinked.
pub fn resolve_vendor(configured: &str, discovered: &str) -> Option<Vendor> {
    let configured = configured.trim().to_lowercase();
    let discovered = discovered.trim().to_lowercase();

    let name = match (configured.is_empty(), discovered.is_empty()) {
        (false, false) => {
            if configured != discovered {
                tracing::info!(
                    "Configured repo_vendor `{}` differs from discovered repo_vendor `{}`. Using `{}`.",
                    configured,
                    discovered,
                    configured
                );
            }
            configured
        }
        (false, true) => configured,
        (true, false) => {
            tracing::debug!(
                "repo_vendor not configured, using discovered `{}`",
                discovered
            );
            discovered
        }
        (true, true) => {
            tracing::info!(
                "No repo_vendor configured or discovered. Commit hashes and filepaths will not be linkified."
            );
            return None;
        }
    };

    match name.parse::<Vendor>() {
        Ok(vendor) => Some(vendor),
        Err(UnknownVendor(name)) => {
            tracing::info!(
                "repo_vendor `{}` not supported. Only {} supported. Commit hashes and filepaths will not be linkified.",
                name,
                supported_vendors()
            );
            None
        }
    }
}

/// Markdown links for one history entry
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RepoUrls {
    /// `[short](commit url)` or the plain short hash
    pub commit_link: String,

    /// `[path](file url)` or the plain path
    pub file_link: String,
}

/// Build the commit and file cells for an entry
///
/// Without a vendor or a repository URL both cells are plain text; links are
/// never partially constructed.
pub fn build_urls(
    vendor: Option<Vendor>,
    repo_url: &str,
    branch: &str,
    commit_hash_full: &str,
    commit_hash_short: &str,
    filepath: &str,
) -> RepoUrls {
    match vendor {
        Some(vendor) if !repo_url.trim().is_empty() => RepoUrls {
            commit_link: format!(
                "[{}]({})",
                commit_hash_short,
                vendor.commit_url(repo_url, commit_hash_full)
            ),
            file_link: format!(
                "[{}]({})",
                filepath,
                vendor.file_url(repo_url, branch, filepath)
            ),
        },
        _ => RepoUrls {
            commit_link: commit_hash_short.to_string(),
            file_link: filepath.to_string(),
        },
    }
}
