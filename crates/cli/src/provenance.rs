//! Clip records: the inputs and kernel settings behind a written clip result.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Everything needed to rerun a clip and get the same path back.
#[derive(Debug, Serialize)]
pub struct ClipRecord {
    pub subject: String,
    pub window: String,
    pub domain: &'static str,
    pub close_path: bool,
    pub max_iterations: usize,
    pub kernel_version: &'static str,
    pub code_rev: String,
}

impl ClipRecord {
    /// Write the record as `<stem>.clip-record.json` beside `result`.
    pub fn write_beside(&self, result: &Path) -> Result<PathBuf> {
        let record_path = record_path(result);
        let mut doc = serde_json::to_value(self)?;
        doc["result"] = result.to_string_lossy().into();
        fs::write(&record_path, serde_json::to_vec_pretty(&doc)?)
            .with_context(|| format!("writing {}", record_path.display()))?;
        Ok(record_path)
    }
}

fn record_path(result: &Path) -> PathBuf {
    let stem = result
        .file_stem()
        .map_or_else(|| "clip".to_string(), |s| s.to_string_lossy().into_owned());
    result.with_file_name(format!("{stem}.clip-record.json"))
}

/// `GIT_COMMIT` from the environment, else the checkout's HEAD, else "unknown".
pub fn current_git_rev() -> String {
    std::env::var("GIT_COMMIT")
        .ok()
        .filter(|rev| !rev.is_empty())
        .or_else(|| {
            Command::new("git")
                .args(["rev-parse", "HEAD"])
                .output()
                .ok()
                .filter(|output| output.status.success())
                .and_then(|output| String::from_utf8(output.stdout).ok())
                .map(|s| s.trim().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}
