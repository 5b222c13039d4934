// Cache path utilities.
// Resolves where the snapshot slot lives on disk.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// Get the base cache directory (~/.cache/repo-cards on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "repo-cards").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Path to the snapshot file for a cache key, under `dir` or the default cache directory.
pub fn snapshot_path(dir: Option<&Path>, key: &str) -> Option<PathBuf> {
    let base = match dir {
        Some(dir) => dir.to_path_buf(),
        None => cache_dir()?,
    };
    Some(base.join(format!("{}.json", sanitize_name(key))))
}

/// Sanitize a name for use in filesystem paths.
/// Replaces problematic characters with underscores.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}
