// CLI argument parsing and definitions

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "measure-refresh")]
#[command(about = "Measure how long a refresh takes for a single resource type")]
#[command(version)]
pub struct Args {
    /// Resource type to isolate and measure (e.g., aviatrix_gateway)
    #[arg(value_parser = parse_resource_type)]
    pub resource_type: String,

    /// How many refresh runs to measure to get the average time
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub runs: Option<u32>,

    /// Path to a custom configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Project directory holding the state and configuration files
    #[arg(short = 'C', long)]
    pub dir: Option<PathBuf>,

    /// Print the timing report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug output
    #[arg(short, long)]
    pub debug: bool,
}

fn parse_resource_type(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("resource type must not be empty".to_string());
    }
    Ok(trimmed.to_string())
}
