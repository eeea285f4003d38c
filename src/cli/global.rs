use clap::Args;
use std::path::PathBuf;

/// Global arguments that apply to all subcommands
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Suppress informational notices (only errors are logged)
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Extra configuration file applied over the standard locations
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory searched for resource names before the configured ones
    #[arg(long = "resource-dir", global = true, value_name = "DIR")]
    pub resource_dirs: Vec<PathBuf>,

    /// Maximum input size in bytes for in-memory commands (0 = unlimited)
    #[arg(long, global = true, default_value = "104857600")]
    pub max_size: u64,

    /// Process files exceeding --max-size limit
    #[arg(long, global = true)]
    pub force: bool,
}

impl GlobalArgs {
    pub fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            return log::LevelFilter::Error;
        }
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        }
    }
}
