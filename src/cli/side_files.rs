//! Append-only logs written next to the working directory.
//!
//! Both files accumulate across runs so a wrapper script can convert a whole
//! tree one file at a time and review the results afterwards.

use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::{
    config::{MANUAL_LOG_FILE_NAME, MODIFIED_LOG_FILE_NAME},
    core::data::ManualEntry,
};

/// One manual-review line: `[complex] <file>:<line> :: <reason> :: <text>`.
pub fn manual_line(file: &str, entry: &ManualEntry) -> String {
    let text = entry.text.replace('\n', "\\n");
    format!("[complex] {}:{} :: {} :: {}", file, entry.line, entry.reason, text)
}

pub fn append_manual_log(dir: &Path, file: &str, entries: &[ManualEntry]) -> Result<PathBuf> {
    let lines: Vec<String> = entries.iter().map(|entry| manual_line(file, entry)).collect();
    append_lines(&dir.join(MANUAL_LOG_FILE_NAME), &lines)
}

pub fn append_modified_log(dir: &Path, file: &str) -> Result<PathBuf> {
    append_lines(&dir.join(MODIFIED_LOG_FILE_NAME), &[file.to_string()])
}

fn append_lines(path: &Path, lines: &[String]) -> Result<PathBuf> {
    let mut log = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    for line in lines {
        writeln!(log, "{}", line).with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(path.to_path_buf())
}
