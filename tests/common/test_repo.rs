//! TestRepo helper for integration tests.
//!
//! Provides a temporary git repository with deterministic commit dates.

use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// A temporary git repository for testing.
///
/// The repository is automatically cleaned up when the TestRepo is dropped.
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    /// Create a new git repository on branch `main` in a temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let repo = Self { dir };

        repo.git(&["init", "-q"]);
        repo.git(&["symbolic-ref", "HEAD", "refs/heads/main"]);
        repo.git(&["config", "user.name", "Test User"]);
        repo.git(&["config", "user.email", "test@example.com"]);
        repo.git(&["config", "commit.gpgsign", "false"]);

        repo
    }

    /// Get the path to the repository root, with symlinks resolved.
    pub fn path(&self) -> PathBuf {
        self.dir
            .path()
            .canonicalize()
            .expect("Failed to canonicalize temp directory")
    }

    /// Execute a git command in this repository.
    ///
    /// # Panics
    ///
    /// Panics if the command fails to execute or returns a non-zero exit code.
    pub fn git(&self, args: &[&str]) -> String {
        self.git_with_env(args, &[])
    }

    fn git_with_env(&self, args: &[&str], envs: &[(&str, &str)]) -> String {
        let output = Command::new("git")
            .args(args)
            .envs(envs.iter().copied())
            .current_dir(self.dir.path())
            .output()
            .expect("Failed to execute git command");

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            panic!(
                "git {:?} failed with exit code {:?}:\n{}",
                args,
                output.status.code(),
                stderr
            );
        }

        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    /// Write a file in the repository.
    pub fn write_file(&self, name: &str, content: &str) {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(&path, content).expect("Failed to write file");
    }

    /// Read a file from the repository.
    ///
    /// Returns an empty string if the file does not exist.
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.path().join(name)).unwrap_or_default()
    }

    /// Stage a file without committing it.
    pub fn add(&self, name: &str) {
        self.git(&["add", "--", name]);
    }

    /// Write, stage and commit a file with a fixed author/committer date.
    ///
    /// `date` is an ISO 8601 timestamp such as `2024-01-01T10:00:00+00:00`.
    pub fn commit_file(&self, name: &str, content: &str, message: &str, date: &str) {
        self.write_file(name, content);
        self.add(name);
        self.git_with_env(
            &["commit", "-q", "-m", message],
            &[("GIT_AUTHOR_DATE", date), ("GIT_COMMITTER_DATE", date)],
        );
    }

    /// Full hash of HEAD.
    pub fn head(&self) -> String {
        self.git(&["rev-parse", "HEAD"]).trim().to_string()
    }

    /// Delete the loose object behind `rev` to simulate a damaged repository.
    ///
    /// Commands that need the object fail; everything else keeps working.
    pub fn remove_object(&self, rev: &str) {
        let oid = self.git(&["rev-parse", rev]).trim().to_string();
        let (dir, file) = oid.split_at(2);
        let path = self.path().join(".git/objects").join(dir).join(file);
        std::fs::remove_file(&path).expect("Failed to remove loose object");
    }

    /// Detach HEAD at the current commit.
    pub fn detach(&self) {
        self.git(&["checkout", "-q", "--detach"]);
    }
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}
