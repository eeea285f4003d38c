mod args;
mod config;
mod global;
mod handlers;

use clap::{Parser, Subcommand};
use fenc::FencConfig;

use args::{BytesArgs, ConfigAction, ConvertArgs, DetectArgs, ReadArgs};
use global::GlobalArgs;

#[derive(Parser)]
#[command(name = "fenc")]
#[command(version)]
#[command(about = "Read, detect and convert file character encodings", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a file's text, decoded under a named or detected encoding
    Read(ReadArgs),
    /// Dump a file's bytes as hex (or raw)
    Bytes(BytesArgs),
    /// Detect the encoding of one or more files
    Detect(DetectArgs),
    /// Convert a file from one encoding to another
    Convert(ConvertArgs),
    /// Inspect supported encodings and configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.global.log_level())
        .format_timestamp(None)
        .parse_default_env()
        .init();

    let config = FencConfig::load_with_overrides(cli.global.config.as_deref())?;
    let access = config::build_access(&config, &cli.global);

    match cli.command {
        Commands::Read(args) => handlers::read::handle(args, &cli.global, &access),
        Commands::Bytes(args) => handlers::bytes::handle(args, &cli.global, &access),
        Commands::Detect(args) => handlers::detect::handle(args, &access),
        Commands::Convert(args) => handlers::convert::handle(args, &cli.global, &access),
        Commands::Config { action } => handlers::config::handle(action, &config),
    }
}
