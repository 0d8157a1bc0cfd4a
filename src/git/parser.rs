//! git output parser
//!
//! Parses the output from git commands into structured data.

use chrono::{DateTime, FixedOffset};

use super::GitError;
use super::template::{FIELD_SEPARATOR, LOG_FIELD_COUNT};

/// One raw `git log` record, before sanitizing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Committer timestamp with its UTC offset
    pub timestamp: DateTime<FixedOffset>,

    /// Abbreviated commit hash
    pub hash_short: String,

    /// Full commit hash
    pub hash_full: String,

    /// Author name, untrusted
    pub author: String,

    /// Subject line, untrusted
    pub subject: String,
}

/// Parser for git command output
pub struct Parser;

impl Parser {
    /// Parse the output of a single-record `git log` query
    ///
    /// Empty output (a tracked file that was never committed) is reported
    /// as [`GitError::MissingFields`].
    pub fn parse_log_record(output: &str) -> Result<LogRecord, GitError> {
        let record = output.trim_end_matches(['\n', '\r']);
        let fields: Vec<&str> = record.splitn(LOG_FIELD_COUNT, FIELD_SEPARATOR).collect();

        if fields.len() < LOG_FIELD_COUNT {
            return Err(GitError::MissingFields {
                expected: LOG_FIELD_COUNT,
                actual: fields.len(),
            });
        }

        let timestamp = Self::parse_timestamp(fields[0])?;
        let hash_short = fields[1].trim();
        let hash_full = fields[2].trim();

        if !is_hex(hash_short) || !is_hex(hash_full) || !hash_full.starts_with(hash_short) {
            return Err(GitError::ParseError(format!(
                "Inconsistent commit hashes: short '{}', full '{}'",
                hash_short, hash_full
            )));
        }

        Ok(LogRecord {
            timestamp,
            hash_short: hash_short.to_string(),
            hash_full: hash_full.to_string(),
            author: fields[3].to_string(),
            subject: fields[4].to_string(),
        })
    }

    /// Parse a strict ISO 8601 timestamp
    ///
    /// Accepts explicit offsets (`+09:00`, `-05:30`) and the `Z` spelling of
    /// UTC, which is equivalent to `+00:00`.
    pub fn parse_timestamp(value: &str) -> Result<DateTime<FixedOffset>, GitError> {
        let value = value.trim();
        DateTime::parse_from_rfc3339(value).map_err(|source| GitError::InvalidTimestamp {
            value: value.to_string(),
            source,
        })
    }

    /// Parse NUL-terminated `git ls-files -z` output
    pub fn parse_ls_files(output: &str) -> Vec<String> {
        output
            .split('\0')
            .filter(|path| !path.is_empty())
            .map(str::to_string)
            .collect()
    }
}

fn is_hex(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_hexdigit())
}
