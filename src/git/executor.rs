//! git command executor
//!
//! Handles running git commands and capturing their output.

use std::path::{Path, PathBuf};
use std::process::Command;

use super::GitError;
use super::constants::{self, commands, env, errors, flags, special};
use super::parser::Parser;
use super::template::Templates;

/// Executor for git commands
#[derive(Debug, Clone)]
pub struct GitExecutor {
    /// Path to the repository (None = current directory)
    repo_path: Option<PathBuf>,
}

impl Default for GitExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl GitExecutor {
    /// Create a new executor for the current directory
    pub fn new() -> Self {
        Self { repo_path: None }
    }

    /// Create a new executor for a specific repository path
    pub fn with_repo_path(path: PathBuf) -> Self {
        Self {
            repo_path: Some(path),
        }
    }

    /// Open the repository containing `start_dir`
    ///
    /// git searches `start_dir` and its ancestors for a repository. The
    /// returned executor is rooted at the top of the working tree, so every
    /// path it reports is relative to that root.
    pub fn discover(start_dir: Option<&Path>) -> Result<Self, GitError> {
        let locator = match start_dir {
            Some(dir) => Self::with_repo_path(dir.to_path_buf()),
            None => Self::new(),
        };

        let output = locator.run(&[commands::REV_PARSE, flags::SHOW_TOPLEVEL])?;
        let toplevel = output.trim_end_matches(['\n', '\r']);
        if toplevel.is_empty() {
            return Err(GitError::ParseError(
                "git rev-parse returned an empty top-level path".to_string(),
            ));
        }

        Ok(Self::with_repo_path(PathBuf::from(toplevel)))
    }

    /// Repository root, if this executor is bound to one
    pub fn repo_path(&self) -> Option<&Path> {
        self.repo_path.as_deref()
    }

    /// Build the git command for `args`
    ///
    /// Messages are forced to the C locale and pathspecs are literal, so a
    /// file name like `[ab].md` only ever matches itself.
    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(constants::GIT_COMMAND);
        let (lc_all, locale) = env::LC_ALL;
        cmd.env(lc_all, locale).env_remove(env::LANGUAGE);

        if let Some(ref path) = self.repo_path {
            cmd.arg(flags::WORK_DIR).arg(path);
        }

        cmd.arg(flags::LITERAL_PATHSPECS).args(args);
        cmd
    }

    /// Run a git command with the given arguments
    ///
    /// The child process is always waited on, so no handle outlives the call.
    pub fn run(&self, args: &[&str]) -> Result<String, GitError> {
        let output = self.command(args).output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                GitError::GitNotFound
            } else {
                GitError::IoError(e)
            }
        })?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            let exit_code = output.status.code().unwrap_or(-1);

            if stderr.contains(errors::NOT_A_REPO) {
                return Err(GitError::NotARepository);
            }

            Err(GitError::CommandFailed { stderr, exit_code })
        }
    }

    /// Name of the checked out branch
    ///
    /// With a detached HEAD there is no branch; the full HEAD commit id is
    /// returned instead, which hosting vendors accept in file URLs.
    pub fn current_branch(&self) -> Result<String, GitError> {
        match self.run(&[
            commands::SYMBOLIC_REF,
            flags::QUIET,
            flags::SHORT,
            special::HEAD,
        ]) {
            Ok(output) => Ok(output.trim().to_string()),
            Err(GitError::CommandFailed { exit_code: 1, .. }) => {
                tracing::debug!("HEAD is detached, using the commit id as branch");
                let output = self.run(&[commands::REV_PARSE, special::HEAD])?;
                Ok(output.trim().to_string())
            }
            Err(e) => Err(e),
        }
    }

    /// List tracked files below `scope`
    ///
    /// Paths are relative to the repository root.
    pub fn ls_files(&self, scope: &Path) -> Result<Vec<String>, GitError> {
        let scope = scope.to_string_lossy().into_owned();
        let output = self.run(&[
            commands::LS_FILES,
            flags::NUL_TERMINATED,
            flags::PATHSPEC_SEPARATOR,
            scope.as_str(),
        ])?;
        Ok(Parser::parse_ls_files(&output))
    }

    /// Run `git log` for the single most recent commit touching `file`
    pub fn latest_change_raw(&self, file: &str) -> Result<String, GitError> {
        self.run(&[
            commands::LOG,
            flags::MAX_COUNT_ONE,
            Templates::latest_change(),
            flags::DATE_ISO_STRICT,
            flags::PATHSPEC_SEPARATOR,
            file,
        ])
    }
}
