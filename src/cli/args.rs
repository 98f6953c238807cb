use clap::Parser;
use std::path::PathBuf;

/// Default config file name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "packcode.toml";

/// CLI argument parsing with environment variable support.
///
/// Environment variables follow the pattern `PACKCODE_*` and are overridden by CLI flags.
/// Example: `PACKCODE_OUTPUT=bundle.txt` is overridden by `--output all.txt`.
#[derive(Parser, Debug)]
#[command(name = "packcode")]
#[command(about = "Bundle a project's source files into a single text document")]
#[command(version)]
pub struct Args {
    /// Root directory to pack
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Config file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE, env = "PACKCODE_CONFIG")]
    pub config: PathBuf,

    /// Output document path (relative to the working directory)
    #[arg(short, long, env = "PACKCODE_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Print the resolved configuration and exit without packing
    #[arg(long)]
    pub dry_run: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(short, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress lines
    #[arg(short)]
    pub quiet: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
