// Copyright (c) 2025-2026 the packcode contributors
// SPDX-License-Identifier: Apache-2.0

use super::{PackRules, SkippedEntry};
use crate::utils::error::SkipReason;
use ignore::{DirEntry, Walk, WalkBuilder};
use std::path::{Path, PathBuf};

/// A file that passed name and extension filtering and is about to be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Path on disk, as produced by the walk
    pub path: PathBuf,
    /// Root-relative path used in headers and reports
    pub display_path: String,
    pub extension: String,
}

/// Lowercase extension of a file name, leading dot included.
///
/// Only the last dot counts (`archive.tar.gz` gives `.gz`), and a name whose
/// only dot is the leading one (`.gitignore`) has no extension.
pub fn file_extension(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
}

/// Normalize path to a forward-slash separated string.
fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Render `path` relative to `root` as `./dir/file.ext`.
pub(crate) fn display_path(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(relative) if relative.as_os_str().is_empty() => ".".to_string(),
        Ok(relative) => format!("./{}", normalize_path(relative)),
        Err(_) => normalize_path(path),
    }
}

/// Build the pre-order walk over `root`.
///
/// No ignore files or hidden-file rules apply: only `rules.ignored_dirs`
/// prunes, and it does so before descending, so nothing below an ignored
/// directory is ever listed. At every level the files come first, then the
/// subdirectories, each group sorted by name.
fn build_walker(root: &Path, rules: &PackRules) -> Walk {
    let ignored_dirs = rules.ignored_dirs.clone();

    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .follow_links(false)
        .max_depth(None)
        .sort_by_file_path(|a, b| {
            a.is_dir()
                .cmp(&b.is_dir())
                .then_with(|| a.file_name().cmp(&b.file_name()))
        })
        .filter_entry(move |entry| {
            if entry.depth() == 0 || !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                return true;
            }
            let pruned = ignored_dirs.contains(entry.file_name().to_string_lossy().as_ref());
            if pruned {
                tracing::debug!("Pruning ignored directory: {}", entry.path().display());
            }
            !pruned
        });
    builder.build()
}

/// Walk `root` and yield every file eligible for packing, in walk order.
///
/// Entries that cannot be listed come back as `Err` with the affected path;
/// the walk carries on past them.
pub fn scan_files<'a>(
    root: &'a Path,
    rules: &'a PackRules,
) -> impl Iterator<Item = Result<Candidate, SkippedEntry>> + 'a {
    build_walker(root, rules).filter_map(move |result| match result {
        Ok(entry) => classify(root, rules, &entry).map(Ok),
        Err(err) => Some(Err(walk_failure(root, &err))),
    })
}

fn classify(root: &Path, rules: &PackRules, entry: &DirEntry) -> Option<Candidate> {
    if entry.depth() == 0 {
        return None;
    }

    let path = entry.path();
    let is_file = match entry.file_type() {
        Some(ft) if ft.is_file() => true,
        // Links are read through; a dangling one fails at read time and is reported
        Some(ft) if ft.is_symlink() => !path.is_dir(),
        _ => false,
    };
    if !is_file {
        return None;
    }

    // Lossy names still match; the real path is kept for the read
    let name = entry.file_name().to_string_lossy();

    if rules.is_ignored_file(&name) {
        tracing::trace!("Ignored file name: {}", path.display());
        return None;
    }

    let extension = file_extension(&name).filter(|ext| rules.allows_extension(ext));
    let Some(extension) = extension else {
        tracing::trace!("Extension not allowed: {}", path.display());
        return None;
    };

    Some(Candidate {
        path: path.to_path_buf(),
        display_path: display_path(root, path),
        extension,
    })
}

fn walk_failure(root: &Path, err: &ignore::Error) -> SkippedEntry {
    let path = error_path(err).map_or_else(|| display_path(root, root), |p| display_path(root, p));
    let reason = err
        .io_error()
        .map_or_else(|| err.to_string(), ToString::to_string);
    SkippedEntry {
        path,
        reason: SkipReason::Walk(reason),
    }
}

fn error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.as_path()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        ignore::Error::Loop { child, .. } => Some(child.as_path()),
        _ => None,
    }
}
