//! Table column identifiers

use std::fmt;
use std::str::FromStr;

/// A column of the latest-changes table
///
/// Configured through `table_features`; the order of the configured list is
/// the left-to-right order of the rendered columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// Plain repository-relative path
    Filepath,
    /// Path linked to the file on the hosting vendor
    FileLinkGitRepo,
    /// Path linked relative to the page being rendered
    PagePathLink,
    /// Commit timestamp
    Timestamp,
    /// Author name
    Author,
    /// Commit subject
    Message,
    /// Short hash linked to the commit on the hosting vendor
    CommitHashLink,
}

impl Column {
    /// Every column, in declaration order
    pub const ALL: [Column; 7] = [
        Column::Filepath,
        Column::FileLinkGitRepo,
        Column::PagePathLink,
        Column::Timestamp,
        Column::Author,
        Column::Message,
        Column::CommitHashLink,
    ];

    /// Default column set
    pub const DEFAULT: [Column; 5] = [
        Column::FileLinkGitRepo,
        Column::Timestamp,
        Column::Author,
        Column::Message,
        Column::CommitHashLink,
    ];

    /// Identifier used in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Filepath => "filepath",
            Column::FileLinkGitRepo => "file_link_git_repo",
            Column::PagePathLink => "page_path_link",
            Column::Timestamp => "timestamp",
            Column::Author => "author",
            Column::Message => "message",
            Column::CommitHashLink => "commit_hash_link",
        }
    }

    /// Human-readable header
    ///
    /// When only the docs directory is tracked every file is a page, so the
    /// page column drops the "/File" suffix.
    pub fn header(&self, scope_is_docs_only: bool) -> &'static str {
        match self {
            Column::Filepath => "File",
            Column::FileLinkGitRepo => "File (Git)",
            Column::PagePathLink if scope_is_docs_only => "Page",
            Column::PagePathLink => "Page/File",
            Column::Timestamp => "Date",
            Column::Author => "Author",
            Column::Message => "Description",
            Column::CommitHashLink => "Commit",
        }
    }

    /// Quoted, sorted, comma-separated list of valid identifiers
    pub fn valid_identifiers() -> String {
        let mut names: Vec<&str> = Column::ALL.iter().map(Column::as_str).collect();
        names.sort_unstable();
        names
            .iter()
            .map(|name| format!("\"{name}\""))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Column {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::ALL
            .into_iter()
            .find(|column| column.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}
