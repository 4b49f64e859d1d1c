pub mod config;
pub mod loader;

pub use config::{BenchConfig, DEFAULT_PROVIDER_CONFIG};
pub use loader::{ConfigLoader, ConfigSource, LoadedConfig};
