//! # packcode
//!
//! packcode walks a project tree and concatenates every selected text file
//! into one document, each file preceded by a header naming its path:
//!
//! ```text
//!
//!
//! ==================================================
//! File Path: ./src/app.ts
//! ==================================================
//!
//! <file content>
//! ```
//!
//! ## Architecture
//!
//! - [`packer`] - the traversal, filtering and output document
//! - [`cli`] - argument parsing and layered configuration
//! - [`utils`] - error types, progress reporting and formatting helpers
//!
//! Configuration follows hierarchical precedence:
//! 1. User config (~/.config/packcode/config.toml)
//! 2. Git root (packcode.toml)
//! 3. Current directory (packcode.toml)
//! 4. Explicit --config path
//! 5. Environment variables (PACKCODE_*)
//! 6. CLI flags (highest precedence)
//!
//! The library entry point is [`packer::pack`]:
//!
//! ```no_run
//! use packcode::packer::{PackOptions, PackRules, pack};
//! use packcode::utils::report::NullReporter;
//! use std::path::Path;
//!
//! let options = PackOptions::new("bundle.txt")
//!     .with_rules(PackRules::new([".rs", ".toml"], ["target", ".git"], ["Cargo.lock"]));
//! let summary = pack(Path::new("."), &options, &mut NullReporter)?;
//! println!("{} files packed", summary.files_included);
//! # Ok::<(), packcode::utils::error::PackError>(())
//! ```

pub mod cli;
pub mod packer;
pub mod utils;

use anyhow::Result;
use cli::config::{Config, PackSection};
use packer::{PackOptions, PackRules};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use utils::error::PackError;
use utils::report::ConsoleReporter;

/// Final resolved configuration after merging all sources (CLI, env, config files).
#[derive(Debug, Clone)]
pub struct MergedConfig {
    /// Root directory to pack
    pub path: PathBuf,
    /// Output document path
    pub output: PathBuf,
    /// Extension and ignore sets
    pub rules: PackRules,
    /// Print the configuration instead of packing
    pub dry_run: bool,
    /// Verbosity level (0-2)
    pub verbose: u8,
    /// Quiet mode (suppress progress lines)
    pub quiet: bool,
}

/// Initialize the tracing subscriber on stderr.
///
/// `RUST_LOG` wins over the verbosity flags when set.
pub fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

pub fn run(config: MergedConfig) -> Result<()> {
    tracing::info!("packcode v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::debug!(
        "Configuration: path={}, output={}, extensions={:?}, ignore_dirs={:?}, ignore_files={:?}",
        config.path.display(),
        config.output.display(),
        config.rules.allowed_extensions,
        config.rules.ignored_dirs,
        config.rules.ignored_files
    );

    if !config.path.is_dir() {
        return Err(PackError::invalid_root(&config.path).into());
    }

    if config.rules.allowed_extensions.is_empty() {
        tracing::warn!("No file extensions are allowed; the output document will be empty");
    }

    if config.dry_run {
        display_dry_run_config(&config)?;
        return Ok(());
    }

    let options = PackOptions::new(&config.output).with_rules(config.rules);
    let mut reporter = ConsoleReporter::new(config.quiet);
    let summary = packer::pack(&config.path, &options, &mut reporter)?;

    tracing::debug!(
        "Run finished: {} included, {} skipped",
        summary.files_included,
        summary.skipped.len()
    );
    Ok(())
}

/// Display the effective configuration for dry-run mode.
///
/// The `[pack]` table is printed as TOML so it can be pasted into a
/// packcode.toml.
fn display_dry_run_config(config: &MergedConfig) -> Result<(), PackError> {
    let effective = Config {
        pack: PackSection::from_merged(config),
    };
    let rendered = toml::to_string_pretty(&effective)?;

    println!("Dry Run Mode - Configuration Summary");
    println!("=====================================");
    println!("Path:         {}", config.path.display());
    println!();
    print!("{rendered}");
    println!();
    println!("No files were read or written.");
    Ok(())
}
