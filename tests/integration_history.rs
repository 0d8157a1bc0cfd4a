//! History query integration tests.
//!
//! Runs the latest-change query against real temporary git repositories.

#[path = "common/mod.rs"]
mod common;

use std::path::PathBuf;

use common::TestRepo;
use git_latest_changes::history::{HistoryQuery, get_recent_changes};
use git_latest_changes::model::Vendor;
use tempfile::TempDir;

const T1: &str = "2024-01-01T10:00:00+00:00";
const T2: &str = "2024-01-02T10:00:00+00:00";
const T3: &str = "2024-01-03T10:00:00+00:00";

fn query(repo: &TestRepo) -> HistoryQuery {
    HistoryQuery {
        repo_url: String::new(),
        repo_vendor: None,
        history_limit: -1,
        scope_dir: PathBuf::from("."),
        page_path: repo.path().join("docs/latest-changes.md"),
        start_dir: Some(repo.path()),
    }
}

fn messages(query: &HistoryQuery) -> Vec<String> {
    get_recent_changes(query)
        .expect("query should succeed")
        .entries
        .into_iter()
        .map(|e| e.message)
        .collect()
}

#[test]
fn test_absent_repository_yields_no_entries() {
    skip_if_no_git!();
    let dir = TempDir::new().unwrap();
    let query = HistoryQuery {
        start_dir: Some(dir.path().to_path_buf()),
        scope_dir: PathBuf::from("."),
        ..HistoryQuery::default()
    };

    let changes = get_recent_changes(&query).expect("absent repository is not fatal");
    assert!(changes.entries.is_empty());
    assert_eq!(changes.truncation_notice, None);
}

#[test]
fn test_entries_sorted_newest_first() {
    skip_if_no_git!();
    let repo = TestRepo::new();
    repo.commit_file("b.md", "b", "middle", T2);
    repo.commit_file("c.md", "c", "oldest", T1);
    repo.commit_file("a.md", "a", "newest", T3);

    assert_eq!(
        messages(&query(&repo)),
        vec!["newest", "middle", "oldest"]
    );
}

#[test]
fn test_only_latest_commit_per_file() {
    skip_if_no_git!();
    let repo = TestRepo::new();
    repo.commit_file("a.md", "v1", "first version", T1);
    repo.commit_file("a.md", "v2", "second version", T2);

    let changes = get_recent_changes(&query(&repo)).unwrap();
    assert_eq!(changes.entries.len(), 1);
    assert_eq!(changes.entries[0].message, "second version");
    assert_eq!(changes.entries[0].hash_full, repo.head());
}

#[test]
fn test_history_limit_one() {
    skip_if_no_git!();
    let repo = TestRepo::new();
    repo.commit_file("mkdocs.yml", "site_name: test", "First commit message", T1);
    repo.commit_file(
        "docs/latest-changes.md",
        "{{ latest_changes }}",
        "Second commit message",
        T2,
    );

    let limited = HistoryQuery {
        history_limit: 1,
        ..query(&repo)
    };
    let changes = get_recent_changes(&limited).unwrap();
    assert_eq!(changes.entries.len(), 1);
    assert_eq!(changes.entries[0].message, "Second commit message");
    assert_eq!(changes.entries[0].filepath, "docs/latest-changes.md");
    assert_eq!(
        changes.truncation_notice.as_deref(),
        Some("Only the most recent entry is displayed.")
    );

    for limit in [-1, 0] {
        let unlimited = HistoryQuery {
            history_limit: limit,
            ..query(&repo)
        };
        let changes = get_recent_changes(&unlimited).unwrap();
        assert_eq!(changes.entries.len(), 2);
        assert_eq!(changes.truncation_notice, None);
    }
}

#[test]
fn test_commit_text_sanitized() {
    skip_if_no_git!();
    let repo = TestRepo::new();
    repo.commit_file("a.md", "a", "This commit message contains <html>", T1);
    repo.commit_file(
        "b.md",
        "b",
        r#"This commit message contains "double quotes""#,
        T2,
    );
    repo.commit_file(
        "c.md",
        "c",
        r"This commit message contains a \t tab character",
        T3,
    );

    assert_eq!(
        messages(&query(&repo)),
        vec![
            r"This commit message contains a \t tab character",
            "This commit message contains &quot;double quotes&quot;",
            "This commit message contains &lt;html&gt;",
        ]
    );
}

#[test]
fn test_hashes_and_metadata() {
    skip_if_no_git!();
    let repo = TestRepo::new();
    repo.commit_file("docs/index.md", "# Home", "Add home", "2024-05-06T07:08:09+02:00");

    let changes = get_recent_changes(&query(&repo)).unwrap();
    let entry = &changes.entries[0];

    assert!(entry.hash_full.starts_with(&entry.hash_short));
    assert!(entry.hash_short.len() < entry.hash_full.len());
    assert_eq!(entry.author_name, "Test User");
    assert_eq!(entry.branch, "main");
    assert_eq!(entry.repo_root, repo.path());
    assert_eq!(entry.timestamp.offset().local_minus_utc(), 2 * 3600);
    assert_eq!(
        entry.timestamp.timestamp(),
        chrono::DateTime::parse_from_rfc3339("2024-05-06T07:08:09+02:00")
            .unwrap()
            .timestamp()
    );
}

#[test]
fn test_scope_dir_limits_files() {
    skip_if_no_git!();
    let repo = TestRepo::new();
    repo.commit_file("mkdocs.yml", "site_name: test", "config", T1);
    repo.commit_file("docs/index.md", "# Home", "docs", T2);

    let scoped = HistoryQuery {
        scope_dir: repo.path().join("docs"),
        ..query(&repo)
    };
    let changes = get_recent_changes(&scoped).unwrap();
    let files: Vec<&str> = changes.entries.iter().map(|e| e.filepath.as_str()).collect();
    assert_eq!(files, vec!["docs/index.md"]);
}

#[test]
fn test_staged_but_uncommitted_file_skipped() {
    skip_if_no_git!();
    let repo = TestRepo::new();
    repo.commit_file("a.md", "a", "committed", T1);
    repo.write_file("new.md", "new");
    repo.add("new.md");

    assert_eq!(messages(&query(&repo)), vec!["committed"]);
}

#[test]
fn test_repository_found_from_nested_directory() {
    skip_if_no_git!();
    let repo = TestRepo::new();
    repo.commit_file(
        "subdir/subsubdir/docs/index.md",
        "# Home",
        "Added latest changes page in subdir/subsubdir",
        T1,
    );

    let nested = HistoryQuery {
        start_dir: Some(repo.path().join("subdir/subsubdir")),
        ..query(&repo)
    };
    let changes = get_recent_changes(&nested).unwrap();
    assert_eq!(changes.entries.len(), 1);
    assert_eq!(
        changes.entries[0].filepath,
        "subdir/subsubdir/docs/index.md"
    );
}

#[test]
fn test_vendor_links() {
    skip_if_no_git!();
    let repo = TestRepo::new();
    repo.commit_file("docs/index.md", "# Home", "Add home", T1);

    let linked = HistoryQuery {
        repo_url: "https://github.com/ns/proj".to_string(),
        repo_vendor: Some(Vendor::GitHub),
        ..query(&repo)
    };
    let changes = get_recent_changes(&linked).unwrap();
    let entry = &changes.entries[0];
    let urls = entry.repo_urls();

    assert_eq!(
        urls.file_link,
        "[docs/index.md](https://github.com/ns/proj/blob/main/docs/index.md)"
    );
    assert_eq!(
        urls.commit_link,
        format!(
            "[{}](https://github.com/ns/proj/commit/{})",
            entry.hash_short, entry.hash_full
        )
    );
    assert_eq!(entry.file_local_url(), "index.md");
}

#[test]
fn test_detached_head_uses_commit_id() {
    skip_if_no_git!();
    let repo = TestRepo::new();
    repo.commit_file("a.md", "a", "only", T1);
    repo.detach();

    let changes = get_recent_changes(&query(&repo)).unwrap();
    assert_eq!(changes.entries[0].branch, repo.head());
}

#[test]
fn test_empty_repository_has_no_entries() {
    skip_if_no_git!();
    let repo = TestRepo::new();

    let changes = get_recent_changes(&query(&repo)).unwrap();
    assert!(changes.entries.is_empty());
}

#[test]
fn test_glob_characters_in_file_name_match_literally() {
    skip_if_no_git!();
    let repo = TestRepo::new();
    repo.commit_file("[ab].md", "bracket", "bracket file commit", T1);
    repo.commit_file("a.md", "a", "a commit newer", T3);

    let changes = get_recent_changes(&query(&repo)).unwrap();
    let rows: Vec<(&str, &str)> = changes
        .entries
        .iter()
        .map(|e| (e.filepath.as_str(), e.message.as_str()))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("a.md", "a commit newer"),
            ("[ab].md", "bracket file commit"),
        ]
    );
}

#[test]
fn test_unreadable_file_history_skipped_others_kept() {
    skip_if_no_git!();
    let repo = TestRepo::new();
    repo.commit_file("a.md", "a", "readable", T1);
    repo.commit_file("sub/b.md", "b", "unreadable", T2);
    // `git log -- sub/b.md` now fails, `git log -- a.md` never opens `sub`
    repo.remove_object("HEAD:sub");

    let changes = get_recent_changes(&query(&repo)).expect("one broken file is not fatal");
    let files: Vec<&str> = changes.entries.iter().map(|e| e.filepath.as_str()).collect();
    assert_eq!(files, vec!["a.md"]);
    assert_eq!(changes.entries[0].message, "readable");
}
