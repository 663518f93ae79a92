// src/watch/path_utils.rs

//! Path helpers shared by the watcher and the dispatcher.

use std::path::Path;

/// Convert a path into a string relative to `root`, with forward slashes.
///
/// - First a direct `strip_prefix(root)`.
/// - If that fails (symlinked roots, `/private/var` on macOS), both paths are
///   canonicalized and the strip is retried.
///
/// Returns `None` if `path` does not live under `root`.
pub fn relative_str(root: &Path, path: &Path) -> Option<String> {
    if let Ok(rel) = path.strip_prefix(root) {
        return Some(to_forward_slashes(&rel.to_string_lossy()));
    }

    if let (Ok(root_canon), Ok(path_canon)) =
        (dunce::canonicalize(root), dunce::canonicalize(path))
    {
        if let Ok(rel) = path_canon.strip_prefix(&root_canon) {
            return Some(to_forward_slashes(&rel.to_string_lossy()));
        }
    }

    None
}

pub fn to_forward_slashes(s: &str) -> String {
    s.replace('\\', "/")
}

/// Join a remote root and a relative path with exactly one `/` between them.
pub fn join_remote(remote_root: &str, rel_path: &str) -> String {
    let root = remote_root.trim_end_matches('/');
    let rel = rel_path.trim_start_matches('/');
    if root.is_empty() && remote_root.starts_with('/') {
        return format!("/{rel}");
    }
    format!("{root}/{rel}")
}
