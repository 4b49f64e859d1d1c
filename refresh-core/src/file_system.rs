//! File system helpers for inspecting the project directory.

use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::warn;

/// Regular files directly inside `dir` whose name ends in `.{extension}`,
/// sorted by path.
pub fn files_with_extension(dir: &Path, extension: &str) -> Vec<PathBuf> {
    let pattern = format!(
        "{}/*.{}",
        Pattern::escape(&dir.to_string_lossy()),
        Pattern::escape(extension)
    );

    let entries = match glob::glob(&pattern) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(pattern = %pattern, "invalid glob pattern: {}", e);
            return Vec::new();
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    files
}

/// Remove each file, stopping at the first failure.
pub fn remove_files(paths: &[PathBuf]) -> std::io::Result<()> {
    for path in paths {
        fs::remove_file(path)?;
    }
    Ok(())
}
