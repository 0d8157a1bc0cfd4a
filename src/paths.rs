//! Path helpers for page-relative links

use std::path::{Component, Path, PathBuf};

/// Link from the page at `src_path` to the file at `dest_path`
///
/// - same directory: the bare file name
/// - `dest_path` below the page's directory: a POSIX relative path
/// - anything else: an empty string (no sensible link exists)
///
/// Paths are normalized lexically; neither needs to exist on disk.
pub fn relative_link(src_path: &Path, dest_path: &Path) -> String {
    let src = normalize(src_path);
    let dest = normalize(dest_path);

    let (Some(src_dir), Some(dest_dir)) = (src.parent(), dest.parent()) else {
        return String::new();
    };

    if src_dir == dest_dir {
        return dest
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
    }

    match dest.strip_prefix(src_dir) {
        Ok(relative) => to_posix(relative),
        Err(_) => String::new(),
    }
}

/// Absolute form of `path` comparable with git's view of the working tree
///
/// The longest existing ancestor is canonicalized (symlinks resolved, no
/// `\\?\` prefix on Windows), the non-existent remainder is normalized
/// lexically.
pub fn resolve(path: &Path) -> PathBuf {
    let (base, remainder) = path
        .ancestors()
        .find_map(|base| {
            let canonical = dunce::canonicalize(base).ok()?;
            let remainder = path.strip_prefix(base).ok()?;
            Some((canonical, remainder.to_path_buf()))
        })
        .unwrap_or_else(|| (PathBuf::new(), path.to_path_buf()));

    if remainder.as_os_str().is_empty() {
        return base;
    }
    normalize(&base.join(remainder))
}

/// Collapse `.` and `..` components without touching the filesystem
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

fn to_posix(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
