//! git pretty-format definitions for stable output parsing
//!
//! The format is passed explicitly so user configuration (`format.pretty`,
//! `log.date`) cannot change what the parser sees.

/// Separator used between fields in log output (NUL byte)
///
/// Commit subjects and author names cannot contain NUL, so splitting on it
/// never cuts a field in half.
pub const FIELD_SEPARATOR: char = '\0';

/// Number of fields in one log record
pub const LOG_FIELD_COUNT: usize = 5;

/// Templates for git commands
pub struct Templates;

impl Templates {
    /// `--pretty` argument for the latest-change query
    ///
    /// Fields (separated by NUL):
    /// 1. committer date (`%cd`, shaped by `--date`)
    /// 2. abbreviated commit hash
    /// 3. full commit hash
    /// 4. author name
    /// 5. subject line
    pub fn latest_change() -> &'static str {
        concat!(
            "--pretty=format:",
            "%cd",
            "%x00",
            "%h",
            "%x00",
            "%H",
            "%x00",
            "%an",
            "%x00",
            "%s",
        )
    }
}
