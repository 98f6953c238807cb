// Copyright (c) 2025-2026 the packcode contributors
// SPDX-License-Identifier: Apache-2.0

//! Traversal and concatenation of a project tree into one text document.
//!
//! [`pack`] walks the tree with [`walker::scan_files`], reads every candidate
//! into a [`FileRecord`] and appends it to an [`output::OutputDocument`].
//! Unreadable files and directories are recorded in the [`PackSummary`] and
//! never abort the run; only a failure on the output document does.

pub mod output;
pub mod walker;

use crate::utils::error::{PackError, SkipReason};
use crate::utils::report::Reporter;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

pub use output::OutputDocument;
pub use walker::{Candidate, file_extension, scan_files};

/// Default name of the output document, relative to the working directory.
pub const DEFAULT_OUTPUT_FILE: &str = "project_all_code.txt";

/// Extensions packed when no configuration overrides them.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    ".html", ".css", ".js", ".jsx", ".ts", ".tsx", ".vue", ".json", ".py", ".md",
];

/// Directory names whose whole subtree is never visited.
pub const DEFAULT_IGNORED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    "coverage",
    "__pycache__",
];

/// File names excluded whatever their extension.
pub const DEFAULT_IGNORED_FILES: &[&str] = &["package-lock.json", "yarn.lock", "pnpm-lock.yaml"];

/// The three selection sets for one run.
///
/// Immutable once handed to [`pack`]; extensions are stored normalized
/// (lowercase, leading dot).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackRules {
    pub allowed_extensions: BTreeSet<String>,
    pub ignored_dirs: BTreeSet<String>,
    pub ignored_files: BTreeSet<String>,
}

impl PackRules {
    pub fn new<E, D, F>(extensions: E, ignored_dirs: D, ignored_files: F) -> Self
    where
        E: IntoIterator,
        E::Item: AsRef<str>,
        D: IntoIterator,
        D::Item: AsRef<str>,
        F: IntoIterator,
        F::Item: AsRef<str>,
    {
        Self {
            allowed_extensions: extensions
                .into_iter()
                .filter_map(|ext| normalize_extension(ext.as_ref()))
                .collect(),
            ignored_dirs: ignored_dirs
                .into_iter()
                .map(|name| name.as_ref().to_string())
                .collect(),
            ignored_files: ignored_files
                .into_iter()
                .map(|name| name.as_ref().to_string())
                .collect(),
        }
    }

    pub fn allows_extension(&self, extension: &str) -> bool {
        self.allowed_extensions.contains(extension)
    }

    pub fn is_ignored_dir(&self, name: &str) -> bool {
        self.ignored_dirs.contains(name)
    }

    pub fn is_ignored_file(&self, name: &str) -> bool {
        self.ignored_files.contains(name)
    }
}

impl Default for PackRules {
    fn default() -> Self {
        Self::new(
            DEFAULT_EXTENSIONS.iter().copied(),
            DEFAULT_IGNORED_DIRS.iter().copied(),
            DEFAULT_IGNORED_FILES.iter().copied(),
        )
    }
}

/// Normalize a user-supplied extension to `.ext` in lowercase.
///
/// Returns `None` for blank input.
pub fn normalize_extension(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_start_matches('.');
    if trimmed.is_empty() {
        return None;
    }
    Some(format!(".{}", trimmed.to_lowercase()))
}

/// Everything a single [`pack`] call needs besides the root.
#[derive(Debug, Clone)]
pub struct PackOptions {
    pub rules: PackRules,
    /// Path of the output document; relative paths resolve against the
    /// current working directory, not the root.
    pub output: PathBuf,
}

impl PackOptions {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            rules: PackRules::default(),
            output: output.into(),
        }
    }

    pub fn with_rules(mut self, rules: PackRules) -> Self {
        self.rules = rules;
        self
    }
}

impl Default for PackOptions {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_FILE)
    }
}

/// One included file, alive only between its read and its write.
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// Path shown in the header, e.g. `./src/app.ts`
    pub path: String,
    /// Lowercase extension with leading dot
    pub extension: String,
    pub content: String,
}

impl FileRecord {
    /// Read a candidate in full and decode it as UTF-8.
    pub fn read(candidate: &Candidate) -> Result<Self, SkipReason> {
        let bytes = std::fs::read(&candidate.path)?;
        let content = String::from_utf8(bytes)?;
        Ok(Self {
            path: candidate.display_path.clone(),
            extension: candidate.extension.clone(),
            content,
        })
    }
}

/// A file or directory that contributed nothing because of an error.
#[derive(Debug)]
pub struct SkippedEntry {
    pub path: String,
    pub reason: SkipReason,
}

/// Outcome of a completed run.
#[derive(Debug)]
pub struct PackSummary {
    pub files_included: usize,
    /// Bytes written to the output document, headers included
    pub bytes_written: u64,
    pub output_path: PathBuf,
    pub skipped: Vec<SkippedEntry>,
}

/// Pack every eligible file under `root` into the output document.
///
/// The document is created (or truncated) before the walk starts; failing to
/// create, write or flush it is the only fatal error. Files that cannot be
/// read or decoded, and directories that cannot be listed, are reported and
/// skipped.
pub fn pack(
    root: &Path,
    options: &PackOptions,
    reporter: &mut dyn Reporter,
) -> Result<PackSummary, PackError> {
    let mut document = OutputDocument::create(&options.output)?;
    let output_identity = OutputIdentity::of(&options.output);

    let mut files_included = 0_usize;
    let mut skipped = Vec::new();

    for item in scan_files(root, &options.rules) {
        let candidate = match item {
            Ok(candidate) => candidate,
            Err(entry) => {
                tracing::debug!("Walk failed at {}: {}", entry.path, entry.reason);
                reporter.file_skipped(&entry.path, &entry.reason);
                skipped.push(entry);
                continue;
            }
        };

        if output_identity.matches(&candidate.path) {
            tracing::debug!("Skipping the output document itself: {}", candidate.display_path);
            continue;
        }

        match FileRecord::read(&candidate) {
            Ok(record) => {
                document.append(&record)?;
                files_included += 1;
                reporter.file_included(&record.path);
            }
            Err(reason) => {
                tracing::debug!("Read failed for {}: {}", candidate.display_path, reason);
                reporter.file_skipped(&candidate.display_path, &reason);
                skipped.push(SkippedEntry {
                    path: candidate.display_path,
                    reason,
                });
            }
        }
    }

    let bytes_written = document.finish()?;
    tracing::info!(
        "Packed {} files ({} skipped) into {}",
        files_included,
        skipped.len(),
        options.output.display()
    );

    let summary = PackSummary {
        files_included,
        bytes_written,
        output_path: options.output.clone(),
        skipped,
    };
    reporter.finished(&summary);
    Ok(summary)
}

/// Identifies the output document so the walk never reads it back.
///
/// Only candidates sharing its file name are canonicalized.
struct OutputIdentity {
    file_name: Option<std::ffi::OsString>,
    canonical: Option<PathBuf>,
}

impl OutputIdentity {
    fn of(output: &Path) -> Self {
        Self {
            file_name: output.file_name().map(ToOwned::to_owned),
            canonical: std::fs::canonicalize(output).ok(),
        }
    }

    fn matches(&self, path: &Path) -> bool {
        let (Some(name), Some(canonical)) = (&self.file_name, &self.canonical) else {
            return false;
        };
        if path.file_name() != Some(name.as_os_str()) {
            return false;
        }
        std::fs::canonicalize(path).is_ok_and(|candidate| &candidate == canonical)
    }
}
