// Copyright (c) 2025-2026 the packcode contributors
// SPDX-License-Identifier: Apache-2.0

use super::FileRecord;
use crate::utils::error::PackError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Width of the `=` rule above and below each path label.
pub const SEPARATOR_WIDTH: usize = 50;

/// The delimiter text written before each file's content.
///
/// ```
/// let header = packcode::packer::output::header_block("./a.py");
/// assert!(header.starts_with("\n\n===="));
/// assert!(header.ends_with("File Path: ./a.py\n==================================================\n\n"));
/// ```
pub fn header_block(path: &str) -> String {
    let rule = "=".repeat(SEPARATOR_WIDTH);
    format!("\n\n{rule}\nFile Path: {path}\n{rule}\n\n")
}

/// Append-only writer for the packed document.
///
/// Created once per run. Dropping it on an error path still flushes what the
/// buffer holds, so bytes already accepted reach the disk.
#[derive(Debug)]
pub struct OutputDocument {
    path: PathBuf,
    writer: BufWriter<File>,
    bytes_written: u64,
}

impl OutputDocument {
    /// Create or truncate the document at `path`.
    pub fn create(path: &Path) -> Result<Self, PackError> {
        let file = File::create(path).map_err(|e| PackError::output_unavailable(path, e))?;
        tracing::debug!("Opened output document {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            bytes_written: 0,
        })
    }

    /// Write one header block followed by the record's content, verbatim.
    pub fn append(&mut self, record: &FileRecord) -> Result<(), PackError> {
        let header = header_block(&record.path);
        self.write_all(header.as_bytes())?;
        self.write_all(record.content.as_bytes())
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<(), PackError> {
        self.writer
            .write_all(bytes)
            .map_err(|e| PackError::output_unavailable(&self.path, e))?;
        self.bytes_written += bytes.len() as u64;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Flush and close the document, returning the number of bytes written.
    pub fn finish(mut self) -> Result<u64, PackError> {
        self.writer
            .flush()
            .map_err(|e| PackError::output_unavailable(&self.path, e))?;
        tracing::debug!(
            "Closed output document {} ({} bytes)",
            self.path.display(),
            self.bytes_written
        );
        Ok(self.bytes_written)
    }
}
