pub mod command_stream;
pub mod error;
pub mod file_system;
pub mod output_macros;
pub mod signals;
pub mod temp_dir;

#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

// Re-export the runner capability for convenience
pub use command_stream::{CapturedOutput, CommandSpec, ProcessRunner, SystemRunner};
pub use error::{BenchError, Result};
