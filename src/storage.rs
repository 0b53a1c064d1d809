//! Output artifacts: plain-text summaries and JSON report exports.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    Ok(())
}

/// Write a plain-text summary, one line per entry.
pub fn write_summary(path: &Path, lines: &[String]) -> Result<()> {
    ensure_parent(path)?;
    let mut body = lines.join("\n");
    body.push('\n');
    std::fs::write(path, body).with_context(|| format!("failed to write {}", path.display()))
}

/// Export a report as pretty-printed JSON.
pub fn export_json<T: Serialize>(path: &Path, report: &T) -> Result<()> {
    ensure_parent(path)?;
    let json = serde_json::to_string_pretty(report).context("failed to serialize report")?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}
