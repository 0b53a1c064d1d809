//! Parsers for the parallel k-means lab logs.
//!
//! The log directory holds `run_seq.log` (sequential baseline) and one
//! `run_t<N>.log` per thread count. Every file carries repeated
//! `Computation timing = X` lines; thread logs additionally carry a
//! `Threads = N` line.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use super::{parse_float, read_log, ParseError};

static THREADS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Threads\s*=\s*(\d+)").unwrap());
static TIMING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Computation timing\s*=\s*([\d.]+)").unwrap());

/// Extract every `Computation timing = X` sample in line order.
pub fn parse_timings(text: &str) -> Result<Vec<f64>, ParseError> {
    let mut samples = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if let Some(caps) = TIMING_RE.captures(line) {
            samples.push(parse_float(&caps[1], idx + 1)?);
        }
    }
    Ok(samples)
}

/// Parse one thread log; `None` when the file lacks a thread count or any
/// timing entry (the file is skipped, not an error).
pub fn parse_thread_log(text: &str) -> Result<Option<(u32, Vec<f64>)>, ParseError> {
    let threads = THREADS_RE
        .captures(text)
        .and_then(|caps| caps[1].parse::<u32>().ok());
    let samples = parse_timings(text)?;
    Ok(match threads {
        Some(t) if !samples.is_empty() => Some((t, samples)),
        _ => None,
    })
}

/// Scan `dir` for `run_t*.log` files (sorted by name) and collect samples
/// keyed by thread count, ascending. A later file with the same thread count
/// replaces the earlier one.
pub fn collect_thread_logs(dir: &Path) -> Result<BTreeMap<u32, Vec<f64>>, ParseError> {
    let entries = std::fs::read_dir(dir).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ParseError::MissingLog {
            path: dir.to_path_buf(),
        },
        _ => ParseError::Io {
            path: dir.to_path_buf(),
            source: e,
        },
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|name| name.starts_with("run_t") && name.ends_with(".log"))
        })
        .collect();
    paths.sort();

    let mut data = BTreeMap::new();
    for path in paths {
        let text = read_log(&path)?;
        if let Some((threads, samples)) = parse_thread_log(&text)? {
            data.insert(threads, samples);
        }
    }
    Ok(data)
}
