use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Arguments for reading a file as text
#[derive(Args, Debug)]
pub struct ReadArgs {
    /// File path or resource name
    pub path: String,

    /// Encoding of the file (defaults to settings.default_encoding)
    #[arg(short = 'e', long, value_name = "ENC", conflicts_with = "detect")]
    pub encoding: Option<String>,

    /// Detect the encoding instead of naming it
    #[arg(long)]
    pub detect: bool,

    /// Output file (writes UTF-8 to stdout if not provided)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}

/// Arguments for dumping raw bytes
#[derive(Args, Debug)]
pub struct BytesArgs {
    /// File path or resource name
    pub path: String,

    /// Write the bytes unchanged instead of a hex dump
    #[arg(short = 'r', long)]
    pub raw: bool,
}

/// Arguments for encoding detection
#[derive(Args, Debug)]
pub struct DetectArgs {
    /// Files to inspect
    #[arg(required = true)]
    pub paths: Vec<String>,

    /// Emit a JSON array instead of one line per file
    #[arg(long)]
    pub json: bool,
}

/// Arguments for converting a file between encodings
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Input file path or resource name
    pub input: String,

    /// Output file (created or truncated)
    pub output: PathBuf,

    /// Encoding of the input, or "auto" to detect it
    #[arg(short = 'f', long, value_name = "ENC")]
    pub from: String,

    /// Encoding for the output
    #[arg(short = 't', long, value_name = "ENC")]
    pub to: String,

    /// Stream through bounded buffers instead of loading the whole file
    #[arg(short = 's', long)]
    pub stream: bool,
}

/// Config subcommand actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// List supported encoding names
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the effective configuration as TOML
    Show,
}
