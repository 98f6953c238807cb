// Copyright (c) 2025-2026 the packcode contributors
// SPDX-License-Identifier: Apache-2.0

//! Human-readable progress lines for a packing run.
//!
//! The packer notifies a [`Reporter`] once per included file, once per
//! skipped file or directory, and once at the end. None of this reaches the
//! output document.

use crate::packer::PackSummary;
use crate::utils::error::SkipReason;
use crate::utils::formatting::{format_bytes, format_number, pluralize};
use console::{Term, style};
use std::io::Write;

/// Observer of a packing run.
///
/// All methods default to doing nothing.
pub trait Reporter {
    fn file_included(&mut self, _path: &str) {}

    fn file_skipped(&mut self, _path: &str, _reason: &SkipReason) {}

    fn finished(&mut self, _summary: &PackSummary) {}
}

/// Discards every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {}

/// Prints progress lines, to stdout unless another writer is given.
#[derive(Debug)]
pub struct ConsoleReporter<W: Write = Term> {
    out: W,
    quiet: bool,
}

impl ConsoleReporter {
    pub fn new(quiet: bool) -> Self {
        Self::with_writer(Term::stdout(), quiet)
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn with_writer(out: W, quiet: bool) -> Self {
        Self { out, quiet }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if self.quiet {
            return;
        }
        if let Err(e) = writeln!(self.out, "{text}") {
            tracing::debug!("Failed to write progress line: {e}");
        }
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn file_included(&mut self, path: &str) {
        self.line(&format!("{} {}", style("Added:").green(), path));
    }

    fn file_skipped(&mut self, path: &str, reason: &SkipReason) {
        self.line(&format!("{} {}: {}", style("Read error").yellow(), path, reason));
    }

    fn finished(&mut self, summary: &PackSummary) {
        self.line("");
        for text in summary_lines(summary) {
            self.line(&text);
        }
    }
}

/// Final summary as plain lines.
pub fn summary_lines(summary: &PackSummary) -> Vec<String> {
    let mut lines = vec![format!(
        "{} {} {} packed into {} ({})",
        style("Done!").green().bold(),
        format_number(summary.files_included),
        pluralize(summary.files_included, "file", "files"),
        summary.output_path.display(),
        format_bytes(summary.bytes_written)
    )];

    if !summary.skipped.is_empty() {
        let count = summary.skipped.len();
        lines.push(format!(
            "{} {} could not be read",
            format_number(count),
            pluralize(count, "entry", "entries")
        ));
    }

    lines
}
