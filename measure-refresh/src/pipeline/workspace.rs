//! The ephemeral workspace the measured refresh runs in.

use std::fs;
use std::path::{Path, PathBuf};

use refresh_core::bench_warning;
use refresh_core::error::{BenchError, Result};
use refresh_core::temp_dir::{create_temp_dir, create_temp_dir_in};
use tempfile::TempDir;
use tracing::debug;

/// Scoped owner of the temporary directory.
///
/// The directory is removed on drop, so every exit path out of the pipeline
/// (including `?` propagation and panics) releases it. [`Workspace::close`]
/// is the success path and reports removal failures instead of logging them.
#[derive(Debug)]
pub struct Workspace {
    dir: Option<TempDir>,
    path: PathBuf,
}

impl Workspace {
    pub fn create(prefix: &str, root: Option<&Path>) -> Result<Self> {
        let dir = match root {
            Some(root) => create_temp_dir_in(prefix, root),
            None => create_temp_dir(prefix),
        }
        .map_err(|e| BenchError::workspace("making temp dir", e))?;

        let path = dir.path().to_path_buf();
        debug!(path = %path.display(), "workspace created");
        Ok(Self {
            dir: Some(dir),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn join(&self, name: impl AsRef<Path>) -> PathBuf {
        self.path.join(name)
    }

    /// Writes `contents` to `name` inside the workspace.
    pub fn write_file(&self, name: &str, contents: &[u8]) -> Result<PathBuf> {
        let target = self.join(name);
        fs::write(&target, contents)
            .map_err(|e| BenchError::workspace(format!("writing {}", name), e))?;
        Ok(target)
    }

    /// Copies `source` into the workspace under its own file name.
    pub fn copy_in(&self, source: &Path) -> Result<PathBuf> {
        let name = source.file_name().ok_or_else(|| {
            BenchError::workspace(
                format!("copying {}", source.display()),
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
            )
        })?;
        let target = self.join(name);
        fs::copy(source, &target).map_err(|e| {
            BenchError::workspace(format!("copying {} to temp dir", source.display()), e)
        })?;
        Ok(target)
    }

    /// Removes the workspace now, surfacing any I/O error.
    pub fn close(mut self) -> Result<()> {
        match self.dir.take() {
            Some(dir) => dir
                .close()
                .map_err(|e| BenchError::workspace("removing temp dir", e)),
            None => Ok(()),
        }
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if let Some(dir) = self.dir.take() {
            match dir.close() {
                Ok(()) => debug!(path = %self.path.display(), "workspace removed"),
                Err(e) => bench_warning!(
                    "Failed to remove temp dir {}: {}",
                    self.path.display(),
                    e
                ),
            }
        }
    }
}
