// Copyright (c) 2025-2026 the packcode contributors
// SPDX-License-Identifier: Apache-2.0

use console::style;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PackError {
    /// The output document could not be created, written or flushed.
    #[error("Output document unavailable: {}: {source}", .path.display())]
    OutputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {message}")]
    ParseError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Validation error: {message}\nSuggestion: {suggestion}")]
    ValidationError { message: String, suggestion: String },
}

impl PackError {
    pub fn output_unavailable(path: &Path, source: std::io::Error) -> Self {
        PackError::OutputUnavailable {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn invalid_root(path: &Path) -> Self {
        PackError::ValidationError {
            message: format!("Root directory does not exist: {}", path.display()),
            suggestion: "Pass an existing directory as PATH, or run from the project root"
                .to_string(),
        }
    }
}

impl From<toml::ser::Error> for PackError {
    fn from(err: toml::ser::Error) -> Self {
        PackError::ParseError {
            message: "Failed to render configuration as TOML".to_string(),
            source: Some(Box::new(err)),
        }
    }
}

/// Why a candidate file (or directory) contributed nothing to the output.
///
/// These never abort a run; the walker records them and moves on.
#[derive(Debug, Error)]
pub enum SkipReason {
    #[error("{0}")]
    Read(#[from] std::io::Error),

    #[error("not valid UTF-8 text: {0}")]
    NotUtf8(#[from] std::string::FromUtf8Error),

    #[error("cannot enumerate directory: {0}")]
    Walk(String),
}

/// Render a [`PackError`] for the terminal.
///
/// Verbose mode appends the full `source` chain.
pub fn format_error(error: &PackError, verbose: bool) -> String {
    let mut out = format!("\n{} {}", style("Error:").red().bold(), error);

    if let PackError::OutputUnavailable { path, .. } = error {
        out.push_str(&format!(
            "\n{} check that {} is writable and its parent directory exists",
            style("Hint:").yellow(),
            path.display()
        ));
    }

    if verbose {
        let mut source = std::error::Error::source(error);
        while let Some(cause) = source {
            out.push_str(&format!("\n  caused by: {cause}"));
            source = cause.source();
        }
    }

    out
}
