//! Latest-change query over all tracked files
//!
//! Opens the repository, asks git for the newest commit of every tracked
//! file, orders the entries by recency and applies the history limit.
//!
//! Failures are classified explicitly: a missing repository or a single
//! broken file is [`Failure::Recoverable`] (logged, build continues), every
//! other failure is [`Failure::Fatal`] and aborts the build.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::PluginError;
use crate::git::parser::Parser;
use crate::git::{GitError, GitExecutor, LogRecord};
use crate::model::{HistoryEntry, Vendor};
use crate::sanitize::sanitize;

/// Inputs of one history query
#[derive(Debug, Clone, Default)]
pub struct HistoryQuery {
    /// Base URL of the hosted repository, may be empty
    pub repo_url: String,

    /// Resolved hosting vendor
    pub repo_vendor: Option<Vendor>,

    /// Maximum number of entries; `<= 0` means unlimited
    pub history_limit: i64,

    /// Only files below this path are considered (`.` = whole tree)
    pub scope_dir: PathBuf,

    /// Absolute path of the page being rendered
    pub page_path: PathBuf,

    /// Where the repository search starts (None = current directory)
    pub start_dir: Option<PathBuf>,
}

/// Result of a history query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecentChanges {
    /// Newest first
    pub entries: Vec<HistoryEntry>,

    /// Set when entries were dropped by the history limit
    pub truncation_notice: Option<String>,
}

/// Outcome of a failed git interaction
#[derive(Debug)]
pub enum Failure {
    /// Log a warning and carry on
    Recoverable(String),
    /// Abort the build
    Fatal(PluginError),
}

impl Failure {
    /// Classify an error raised while opening the repository
    ///
    /// Only a missing repository is tolerated (e.g. previewing docs outside a
    /// checkout).
    pub fn on_open(err: GitError) -> Self {
        match err {
            GitError::NotARepository => Failure::Recoverable(err.to_string()),
            other => Failure::Fatal(PluginError::Git(other)),
        }
    }

    /// Classify an error raised while querying one file
    pub fn on_file(file: &str, err: GitError) -> Self {
        match err {
            GitError::CommandFailed { .. } => Failure::Recoverable(err.to_string()),
            GitError::MissingFields { .. } => Failure::Recoverable(format!(
                "{}. Possible cause: file {} not committed yet.",
                err, file
            )),
            other => Failure::Fatal(PluginError::File {
                file: file.to_string(),
                source: other,
            }),
        }
    }
}

/// Query the most recent change of every tracked file in scope
pub fn get_recent_changes(query: &HistoryQuery) -> Result<RecentChanges, PluginError> {
    let executor = match GitExecutor::discover(query.start_dir.as_deref()) {
        Ok(executor) => executor,
        Err(err) => match Failure::on_open(err) {
            Failure::Recoverable(msg) => {
                warn!("{}", msg);
                return Ok(RecentChanges::default());
            }
            Failure::Fatal(err) => return Err(err),
        },
    };

    let branch = executor.current_branch()?;
    let repo_root = executor
        .repo_path()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    debug!(
        "Initialized repo `{}`, branch `{}`",
        repo_root.display(),
        branch
    );

    let files = executor.ls_files(&query.scope_dir)?;
    info!("{} files found in git index and working tree.", files.len());

    let context = EntryContext {
        query,
        branch: &branch,
        repo_root: &repo_root,
    };

    let results = files
        .par_iter()
        .map(|file| query_file(&executor, file, &context))
        .collect::<Result<Vec<_>, PluginError>>()?;

    let mut entries: Vec<HistoryEntry> = results.into_iter().flatten().collect();
    sort_by_recency(&mut entries);

    debug!("history_limit set: {}", query.history_limit);
    let truncation_notice = apply_history_limit(&mut entries, query.history_limit);

    Ok(RecentChanges {
        entries,
        truncation_notice,
    })
}

/// Values shared by every entry of one query
struct EntryContext<'a> {
    query: &'a HistoryQuery,
    branch: &'a str,
    repo_root: &'a Path,
}

impl EntryContext<'_> {
    fn entry(&self, file: &str, record: LogRecord) -> HistoryEntry {
        HistoryEntry {
            filepath: file.to_string(),
            timestamp: record.timestamp,
            author_name: sanitize(&record.author),
            message: sanitize(&record.subject),
            hash_short: record.hash_short,
            hash_full: record.hash_full,
            repo_vendor: self.query.repo_vendor,
            repo_url: self.query.repo_url.clone(),
            branch: self.branch.to_string(),
            repo_root: self.repo_root.to_path_buf(),
            local_page_path: self.query.page_path.clone(),
        }
    }
}

fn query_file(
    executor: &GitExecutor,
    file: &str,
    context: &EntryContext<'_>,
) -> Result<Option<HistoryEntry>, PluginError> {
    debug!("Processing file `{}`", file);

    let record = executor
        .latest_change_raw(file)
        .and_then(|output| Parser::parse_log_record(&output));

    match record {
        Ok(record) => Ok(Some(context.entry(file, record))),
        Err(err) => match Failure::on_file(file, err) {
            Failure::Recoverable(msg) => {
                warn!("Skipping `{}`: {}", file, msg);
                Ok(None)
            }
            Failure::Fatal(err) => Err(err),
        },
    }
}

/// Newest first; entries with equal timestamps keep their order
pub fn sort_by_recency(entries: &mut [HistoryEntry]) {
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

/// Truncate to `history_limit` entries
///
/// Returns the notice shown below the table when entries were dropped. A
/// limit of zero or less disables truncation.
pub fn apply_history_limit(entries: &mut Vec<HistoryEntry>, history_limit: i64) -> Option<String> {
    let limit = usize::try_from(history_limit).ok().filter(|&l| l > 0)?;

    if entries.len() <= limit {
        return None;
    }

    entries.truncate(limit);
    Some(truncation_notice(limit))
}

/// Pluralized "only N shown" text
pub fn truncation_notice(limit: usize) -> String {
    if limit == 1 {
        "Only the most recent entry is displayed.".to_string()
    } else {
        format!("Only the {} most recent entries are displayed.", limit)
    }
}
