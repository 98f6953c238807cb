//! Configuration management using the `config` crate for hierarchical discovery and merging.
//!
//! ## Configuration Sources (in precedence order, highest to lowest):
//! 1. **CLI flags** - Highest precedence (applied by [`merge_config`])
//! 2. **Environment variables** - Middle precedence (via `PACKCODE_*` prefix)
//! 3. **Config files** - Lowest precedence
//!
//! ## Config File Discovery (in merge order, later overrides earlier):
//! 1. `~/.config/packcode/config.toml` (user config directory - lowest precedence)
//! 2. `packcode.toml` in the git repository root containing the packed directory
//! 3. `./packcode.toml` in current directory
//! 4. Explicit `--config` path (must exist - overrides all above)
//!
//! Nested keys use a double underscore in environment variables, and list
//! values are comma separated:
//!
//! ```text
//! PACKCODE_PACK__OUTPUT=bundle.txt
//! PACKCODE_PACK__EXTENSIONS=.rs,.toml
//! ```
//!
//! A list given in any source replaces the built-in default list instead of
//! extending it.

use crate::MergedConfig;
use crate::cli::args::{Args, DEFAULT_CONFIG_FILE};
use crate::packer::{
    DEFAULT_EXTENSIONS, DEFAULT_IGNORED_DIRS, DEFAULT_IGNORED_FILES, DEFAULT_OUTPUT_FILE,
    PackRules,
};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const ENV_PREFIX: &str = "PACKCODE";
const LIST_KEYS: &[&str] = &["pack.extensions", "pack.ignore_dirs", "pack.ignore_files"];

/// Root configuration structure loaded from config files.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub pack: PackSection,
}

/// The `[pack]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackSection {
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "default_ignore_dirs")]
    pub ignore_dirs: Vec<String>,
    #[serde(default = "default_ignore_files")]
    pub ignore_files: Vec<String>,
}

impl Default for PackSection {
    fn default() -> Self {
        Self {
            output: default_output(),
            extensions: default_extensions(),
            ignore_dirs: default_ignore_dirs(),
            ignore_files: default_ignore_files(),
        }
    }
}

impl PackSection {
    /// Render the effective settings back into a `[pack]` table.
    pub fn from_merged(config: &MergedConfig) -> Self {
        Self {
            output: config.output.clone(),
            extensions: config.rules.allowed_extensions.iter().cloned().collect(),
            ignore_dirs: config.rules.ignored_dirs.iter().cloned().collect(),
            ignore_files: config.rules.ignored_files.iter().cloned().collect(),
        }
    }
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_FILE)
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn default_extensions() -> Vec<String> {
    to_strings(DEFAULT_EXTENSIONS)
}

fn default_ignore_dirs() -> Vec<String> {
    to_strings(DEFAULT_IGNORED_DIRS)
}

fn default_ignore_files() -> Vec<String> {
    to_strings(DEFAULT_IGNORED_FILES)
}

fn discover_config_paths(explicit_path: &Path, root: &Path) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // User config (lowest precedence)
    if let Some(user_config) = get_user_config_path() {
        paths.push(user_config);
    }

    // Git root config
    if let Some(git_root) = find_git_root(root) {
        let git_config = git_root.join(DEFAULT_CONFIG_FILE);
        if git_config.exists() {
            paths.push(git_config);
        }
    }

    // Current directory config
    let current_dir_config = PathBuf::from(DEFAULT_CONFIG_FILE);
    if current_dir_config.exists() {
        paths.push(current_dir_config);
    }

    // Explicit --config path (highest precedence)
    if explicit_path != Path::new(DEFAULT_CONFIG_FILE) && explicit_path.exists() {
        paths.push(explicit_path.to_path_buf());
    }

    paths
}

fn find_git_root(start: &Path) -> Option<PathBuf> {
    git2::Repository::discover(start)
        .ok()
        .and_then(|repo| repo.workdir().map(Path::to_path_buf))
}

fn get_user_config_path() -> Option<PathBuf> {
    dirs::config_dir()
        .map(|config_dir| config_dir.join("packcode").join("config.toml"))
        .filter(|path| path.exists())
}

fn environment(source: Option<config::Map<String, String>>) -> config::Environment {
    let mut env = config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .list_separator(",");
    for key in LIST_KEYS {
        env = env.with_list_parse_key(key);
    }
    env.source(source)
}

/// Merge the given files (in order) and the environment into a [`Config`].
///
/// `env` replaces the process environment when set.
fn build(paths: &[PathBuf], env: Option<config::Map<String, String>>) -> Result<Config> {
    let mut builder = config::Config::builder();

    for config_path in paths {
        tracing::debug!("Loading config file {}", config_path.display());
        builder = builder
            .add_source(config::File::from(config_path.as_path()).format(config::FileFormat::Toml));
    }

    builder = builder.add_source(environment(env));

    let settings = builder.build().context("Failed to build configuration")?;

    settings
        .try_deserialize()
        .context("Failed to deserialize configuration")
}

/// Load configuration from discovered config files and environment variables.
pub fn load(args: &Args) -> Result<Config> {
    if args.config != Path::new(DEFAULT_CONFIG_FILE) && !args.config.exists() {
        bail!("Config file not found: {}", args.config.display());
    }

    build(&discover_config_paths(&args.config, &args.path), None)
}

/// Apply CLI flags on top of the loaded configuration.
pub fn merge_config(args: &Args, config: Config) -> MergedConfig {
    let pack = config.pack;
    MergedConfig {
        path: args.path.clone(),
        output: args.output.clone().unwrap_or(pack.output),
        rules: PackRules::new(pack.extensions, pack.ignore_dirs, pack.ignore_files),
        dry_run: args.dry_run,
        verbose: args.verbose,
        quiet: args.quiet,
    }
}
