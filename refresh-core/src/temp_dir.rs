use std::io::Result;
use std::path::Path;
use tempfile::{Builder, TempDir};

/// Creates a uniquely named temporary directory in the system temp location.
/// The directory is automatically deleted when the `TempDir` object is dropped.
pub fn create_temp_dir(prefix: &str) -> Result<TempDir> {
    Builder::new().prefix(prefix).tempdir()
}

/// Creates a uniquely named temporary directory under `root`.
pub fn create_temp_dir_in(prefix: &str, root: &Path) -> Result<TempDir> {
    Builder::new().prefix(prefix).tempdir_in(root)
}
