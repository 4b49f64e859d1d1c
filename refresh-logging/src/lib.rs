//! Tracing initialization for measure-refresh
//!
//! Diagnostics go to stderr so stdout carries only the refresh output and the
//! final report.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use refresh_core::error::{BenchError, Result};

/// Output format of the fmt layer, selected by `RUST_LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl LogFormat {
    /// Parses a `RUST_LOG_FORMAT` value; anything unrecognized is compact.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Compact,
        }
    }

    pub fn from_env() -> Self {
        std::env::var("RUST_LOG_FORMAT")
            .map(|value| Self::parse(&value))
            .unwrap_or(LogFormat::Compact)
    }
}

/// Initialize with a default filter if RUST_LOG is not set
///
/// Uses standard RUST_LOG environment variable for filtering:
/// - `RUST_LOG=debug` - Set global level
/// - `RUST_LOG=measure_refresh=debug,refresh_core=trace` - Set per-module levels
pub fn init_with_defaults(default_filter: &str) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = match LogFormat::from_env() {
        LogFormat::Json => registry
            .with(fmt::layer().with_ansi(false).json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Compact => registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .try_init(),
    };

    result.map_err(|e| {
        BenchError::Io(std::io::Error::other(format!(
            "Failed to initialize tracing: {}",
            e
        )))
    })
}
