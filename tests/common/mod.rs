//! Common test utilities and fixtures for integration tests.
#![allow(dead_code)]

use packcode::packer::{PackOptions, PackRules, PackSummary, pack};
use packcode::utils::error::SkipReason;
use packcode::utils::report::Reporter;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Creates a temporary directory for test fixtures.
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Creates a mock project structure for testing.
pub fn create_mock_project(dir: &TempDir, files: &[(&str, &str)]) -> PathBuf {
    let root = dir.path().join("project");
    std::fs::create_dir_all(&root).expect("Failed to create project root");

    for (path, content) in files {
        write_bytes(&root, path, content.as_bytes());
    }

    root
}

/// Writes raw bytes (e.g. invalid UTF-8) below `root`.
pub fn write_bytes(root: &Path, path: &str, content: &[u8]) {
    let file_path = root.join(path);
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directories");
    }
    std::fs::write(&file_path, content).expect("Failed to write file");
}

/// Small web project with files that must and must not be packed.
pub fn web_project_files() -> Vec<(&'static str, &'static str)> {
    vec![
        ("index.html", "<!doctype html>\n<title>t</title>\n"),
        ("src/app.ts", "export const x = 1;\n"),
        ("src/styles.css", "body { margin: 0; }\n"),
        ("package.json", "{\"name\": \"demo\"}\n"),
        ("package-lock.json", "{\"lockfileVersion\": 3}\n"),
        ("node_modules/left-pad/index.js", "module.exports = 1;\n"),
        ("dist/bundle.js", "minified();\n"),
        ("src/__pycache__/mod.py", "cached = True\n"),
        ("README.md", "# demo\n"),
        ("logo.svg", "<svg/>\n"),
    ]
}

/// The exact header block written before a file's content.
pub fn header(path: &str) -> String {
    let rule = "=".repeat(50);
    format!("\n\n{rule}\nFile Path: {path}\n{rule}\n\n")
}

/// Collects every notification for assertions.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub included: Vec<String>,
    pub skipped: Vec<(String, String)>,
    pub finished: usize,
}

impl Reporter for RecordingReporter {
    fn file_included(&mut self, path: &str) {
        self.included.push(path.to_string());
    }

    fn file_skipped(&mut self, path: &str, reason: &SkipReason) {
        self.skipped.push((path.to_string(), reason.to_string()));
    }

    fn finished(&mut self, _summary: &PackSummary) {
        self.finished += 1;
    }
}

/// Pack `root` into `output` and return the summary, the reporter and the
/// document text.
pub fn pack_with(
    root: &Path,
    output: &Path,
    rules: PackRules,
) -> (PackSummary, RecordingReporter, String) {
    let mut reporter = RecordingReporter::default();
    let options = PackOptions::new(output).with_rules(rules);
    let summary = pack(root, &options, &mut reporter).expect("pack should succeed");
    let document = std::fs::read_to_string(output).expect("Failed to read output document");
    (summary, reporter, document)
}

/// Path to the compiled `packcode` binary.
pub fn packcode_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_packcode"))
}

/// A `packcode` command isolated from the caller's configuration.
pub fn packcode_command(cwd: &Path, config_home: &Path) -> Command {
    let mut cmd = Command::new(packcode_bin());
    cmd.current_dir(cwd)
        .env("XDG_CONFIG_HOME", config_home)
        .env("HOME", config_home)
        .env("CLICOLOR", "0")
        .env_remove("RUST_LOG");
    for (key, _) in std::env::vars_os() {
        if key.to_string_lossy().starts_with("PACKCODE_") {
            cmd.env_remove(key);
        }
    }
    cmd
}
