//! Markdown rendering of history entries
//!
//! Example output with the default columns:
//!
//! ```text
//! | File (Git)                       | Date                | Author   | Description | Commit                    |
//! | -------------------------------- | ------------------- | -------- | ----------- | ------------------------- |
//! | [index.md](remote-repo-index.md) | 2023-11-17 14:20:10 | John Doe | Fixed typo  | [4401df1](full-hash-link) |
//! ```
//!
//! Only the header and separator rows are aligned; data cells are written
//! as-is.

use crate::config::TimestampFormat;
use crate::model::{Column, HistoryEntry, RepoUrls};

/// Shown instead of a table when there is nothing to list
pub const NO_CHANGES_MESSAGE: &str = "No recent changes found.";

/// Inline style of the truncation notice paragraph
const NOTICE_STYLE: &str = "margin-bottom: 1em; margin-top: 1em; padding-top: .5em; font-style: italic; font-size: smaller;";

/// Render entries as a markdown table
///
/// Rows keep the order of `entries`. `columns` must already be validated;
/// see [`crate::config::parse_columns`].
pub fn render_table(
    entries: &[HistoryEntry],
    columns: &[Column],
    timestamp_format: &TimestampFormat,
    scope_is_docs_only: bool,
) -> String {
    if entries.is_empty() {
        return NO_CHANGES_MESSAGE.to_string();
    }

    let headers: Vec<&str> = columns
        .iter()
        .map(|column| column.header(scope_is_docs_only))
        .collect();
    let separators: Vec<String> = headers.iter().map(|h| "-".repeat(h.len())).collect();

    let mut lines = Vec::with_capacity(entries.len() + 2);
    lines.push(table_row(headers.iter().map(|h| h.to_string())));
    lines.push(table_row(separators));

    for entry in entries {
        let urls = entry.repo_urls();
        lines.push(table_row(
            columns
                .iter()
                .map(|&column| cell(column, entry, &urls, timestamp_format)),
        ));
    }

    lines.join("\n")
}

/// Wrap the truncation notice in a small italic paragraph
pub fn render_notice(notice: &str) -> String {
    format!("<p style=\"{}\">{}</p>", NOTICE_STYLE, notice)
}

fn cell(
    column: Column,
    entry: &HistoryEntry,
    urls: &RepoUrls,
    timestamp_format: &TimestampFormat,
) -> String {
    let value = match column {
        Column::Filepath => entry.filepath.clone(),
        Column::FileLinkGitRepo => urls.file_link.clone(),
        Column::PagePathLink => {
            let link = entry.file_local_url();
            if link.is_empty() {
                entry.filepath.clone()
            } else {
                format!("[{}]({})", entry.filepath, link)
            }
        }
        Column::Timestamp => timestamp_format.format(&entry.timestamp),
        Column::Author => entry.author_name.clone(),
        Column::Message => entry.message.clone(),
        Column::CommitHashLink => urls.commit_link.clone(),
    };
    escape_cell(&value)
}

/// A literal `|` would end the cell early
///
/// Backslashes directly before a pipe are doubled too, otherwise `\|` in
/// the text would turn into an escaped backslash followed by a bare pipe.
fn escape_cell(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let mut escaped = String::with_capacity(value.len());

    for (idx, &ch) in chars.iter().enumerate() {
        match ch {
            '|' => escaped.push_str("\\|"),
            '\\' if chars[idx..].iter().find(|&&c| c != '\\') == Some(&'|') => {
                escaped.push_str("\\\\")
            }
            other => escaped.push(other),
        }
    }
    escaped
}

fn table_row(cells: impl IntoIterator<Item = String>) -> String {
    let cells: Vec<String> = cells.into_iter().collect();
    format!("| {} |", cells.join(" | "))
}
