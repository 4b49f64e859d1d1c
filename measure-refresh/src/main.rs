// Standard library
use std::io;
use std::num::NonZeroU32;
use std::path::PathBuf;

// External crates
use clap::Parser;
use tracing::{debug, info};

// Internal imports
use refresh_config::{ConfigLoader, ConfigSource};
use refresh_core::error::{BenchError, Result};
use refresh_core::signals::install_interrupt_handler;
use refresh_core::{bench_error, bench_error_hint, bench_println, bench_progress, bench_warning};
use refresh_core::SystemRunner;
use refresh_messages::{msg, MESSAGES};

// Local modules
mod cli;
mod pipeline;
mod report;

use cli::Args;
use pipeline::RefreshBenchmark;
use report::format_seconds;

/// Conventional exit status for a run stopped by SIGINT.
const EXIT_INTERRUPTED: i32 = 130;

fn main() {
    let args = Args::parse();

    let filter = if args.debug { "debug" } else { "warn" };
    if refresh_logging::init_with_defaults(filter).is_err() {
        bench_warning!("Failed to initialize structured logging");
    }

    if let Err(e) = install_interrupt_handler() {
        debug!(error = %e, "interrupt handler not installed");
    }

    // All workspace destructors have run by the time `run` returns
    if let Err(e) = run(args) {
        bench_error!("{}", msg!(MESSAGES.common_error_generic, error = e.to_string()));
        match &e {
            BenchError::ToolNotFound { tool } => {
                bench_error_hint!("{}", msg!(MESSAGES.common_hint_install_tool, tool = tool.as_str()));
            }
            BenchError::MissingStateFile { .. } | BenchError::MissingConfigFiles { .. } => {
                bench_error_hint!("{}", MESSAGES.common_hint_project_dir);
            }
            _ => {}
        }
        let code = if matches!(e, BenchError::Interrupted) {
            EXIT_INTERRUPTED
        } else {
            1
        };
        std::process::exit(code);
    }
}

fn run(args: Args) -> Result<()> {
    let project_dir = match args.dir {
        Some(dir) => project_dir_for(dir),
        None => std::env::current_dir()?,
    };
    info!(project_dir = %project_dir.display(), resource_type = %args.resource_type, "starting");

    let loaded = ConfigLoader::new(args.config).load(&project_dir)?;
    if loaded.source != ConfigSource::Defaults {
        bench_progress!(
            "{}",
            msg!(MESSAGES.run_config_loaded, source = loaded.source.to_string())
        );
    }
    let config = loaded.config;

    let runs = resolve_runs(args.runs, config.runs)?;
    let runner = SystemRunner;
    let report = RefreshBenchmark::new(&config, &runner, project_dir)
        .run(&args.resource_type, runs)?;

    if args.json {
        let json = serde_json::to_string(&report.summary())
            .map_err(|e| BenchError::Io(io::Error::new(io::ErrorKind::Other, e)))?;
        bench_println!("{}", json);
    } else {
        bench_println!(
            "{}",
            msg!(
                MESSAGES.refresh_average,
                resource_type = report.resource_type(),
                seconds = format_seconds(report.mean()),
                runs = report.runs().to_string()
            )
        );
    }
    Ok(())
}

/// The command-line count wins over the configured one.
fn resolve_runs(cli: Option<u32>, configured: u32) -> Result<NonZeroU32> {
    let runs = cli.unwrap_or(configured);
    NonZeroU32::new(runs).ok_or_else(|| BenchError::Config("runs must be at least 1".to_string()))
}

fn project_dir_for(dir: PathBuf) -> PathBuf {
    if dir.is_absolute() {
        return dir;
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(dir),
        Err(_) => dir,
    }
}
