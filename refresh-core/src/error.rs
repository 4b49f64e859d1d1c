use std::fmt::{self, Display, Formatter};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenchError {
    MissingStateFile {
        file: String,
        dir: PathBuf,
        source: io::Error,
    },
    MissingConfigFiles {
        extension: String,
        dir: PathBuf,
    },
    ToolNotFound {
        tool: String,
    },
    Workspace {
        context: String,
        source: io::Error,
    },
    Spawn {
        command: String,
        source: io::Error,
    },
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },
    Config(String),
    Interrupted,
    Io(#[from] io::Error),
}

impl Display for BenchError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            BenchError::MissingStateFile { file, dir, source } => write!(
                f,
                "could not find {} file in {}: {}",
                file,
                dir.display(),
                source
            ),
            BenchError::MissingConfigFiles { extension, dir } => {
                write!(f, "no *.{} files found in {}", extension, dir.display())
            }
            BenchError::ToolNotFound { tool } => {
                write!(f, "Dependency not found: {} must be in your PATH", tool)
            }
            BenchError::Workspace { context, source } => {
                write!(f, "Workspace error: {}: {}", context, source)
            }
            BenchError::Spawn { command, source } => {
                write!(f, "Failed to start '{}': {}", command, source)
            }
            BenchError::CommandFailed {
                command,
                status,
                stderr,
            } => {
                write!(f, "Command failed: '{}' ({})", command, status)?;
                let stderr = stderr.trim();
                if !stderr.is_empty() {
                    write!(f, "\n\nstderr:\n{}", stderr)?;
                }
                Ok(())
            }
            BenchError::Config(s) => write!(f, "Configuration error: {}", s),
            BenchError::Interrupted => write!(f, "Interrupted before the run completed"),
            BenchError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl BenchError {
    /// Wraps an I/O failure that happened while touching the ephemeral workspace.
    pub fn workspace(context: impl Into<String>, source: io::Error) -> Self {
        BenchError::Workspace {
            context: context.into(),
            source,
        }
    }

    /// True for failures detected before any workspace was created.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            BenchError::MissingStateFile { .. }
                | BenchError::MissingConfigFiles { .. }
                | BenchError::ToolNotFound { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, BenchError>;
