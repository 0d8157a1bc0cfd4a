//! git-specific constants
//!
//! Centralized definitions for git command names, flags, and special values.

/// git command binary name
pub const GIT_COMMAND: &str = "git";

/// git subcommands
pub mod commands {
    pub const REV_PARSE: &str = "rev-parse";
    pub const SYMBOLIC_REF: &str = "symbolic-ref";
    pub const LS_FILES: &str = "ls-files";
    pub const LOG: &str = "log";
}

/// git command flags
pub mod flags {
    /// Run as if git was started in the given directory (global flag)
    pub const WORK_DIR: &str = "-C";
    /// Treat every pathspec as a literal path, never a glob (global flag)
    pub const LITERAL_PATHSPECS: &str = "--literal-pathspecs";
    /// Print the top-level directory of the working tree
    pub const SHOW_TOPLEVEL: &str = "--show-toplevel";
    /// Shorten ref names (`refs/heads/main` -> `main`)
    pub const SHORT: &str = "--short";
    /// Silence symbolic-ref errors for a detached HEAD
    pub const QUIET: &str = "-q";
    /// NUL-terminate ls-files output so paths are never quoted
    pub const NUL_TERMINATED: &str = "-z";
    /// Only the most recent commit touching the path
    pub const MAX_COUNT_ONE: &str = "--max-count=1";
    /// Committer date in strict ISO 8601, keeping the committer's offset
    pub const DATE_ISO_STRICT: &str = "--date=iso8601-strict";
    /// Separates revisions/options from paths
    pub const PATHSPEC_SEPARATOR: &str = "--";
}

/// Special git values
pub mod special {
    /// Symbolic ref for the checked out commit
    pub const HEAD: &str = "HEAD";

    /// Default scope: the whole working tree
    pub const WHOLE_TREE: &str = ".";
}

/// Environment passed to every git child process
pub mod env {
    /// Untranslated messages, so stderr patterns match in any locale
    pub const LC_ALL: (&str, &str) = ("LC_ALL", "C");
    /// Overrides LC_ALL for message catalogs, so it is removed
    pub const LANGUAGE: &str = "LANGUAGE";
}

/// Error detection patterns in git stderr
///
/// Only valid for untranslated output, see [`env`].
pub mod errors {
    /// Pattern indicating the start directory is not inside a repository
    pub const NOT_A_REPO: &str = "not a git repository";
}
