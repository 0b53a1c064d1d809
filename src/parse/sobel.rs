//! Parsers for the Sobel optimization lab logs.
//!
//! Two formats exist: the consolidated build/run log (`run_results.txt`) with
//! `=== Building with FLAGS ===` / `--- exe (CFLAGS=...) ---` section headers
//! and `Total time = X seconds` data lines, and the saved summary file
//! (`execution_times.txt`) with `Label:` sections and `name: avg ± std
//! seconds` lines.

use std::sync::LazyLock;

use regex::Regex;

use super::{parse_float, ParseError};
use crate::model::{ExecSummary, SobelRuns, SobelSummaryFile, SummarySection};

static FLAG_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^=== Building with (.+) ===$").unwrap());
static EXEC_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^--- (\S+) \(CFLAGS=[^)]*\) ---$").unwrap());
static SUMMARY_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\S+):\s*(\S+)\s*±\s*(\S+)\s*seconds$").unwrap());

/// Parse a consolidated run log into per-flag-set, per-executable samples.
///
/// A `Total time` line only counts while both a flag set and an executable
/// header are active; it consumes the executable, so repeated runs of the
/// same variant each carry their own `---` header. Anything else is skipped.
/// Empty input yields an empty result.
pub fn parse_run_results(text: &str) -> Result<SobelRuns, ParseError> {
    let mut runs = SobelRuns::default();
    let mut current_flag: Option<usize> = None;
    let mut current_exec: Option<String> = None;

    for (idx, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(caps) = FLAG_HEADER_RE.captures(line) {
            current_flag = Some(runs.flag_index(&caps[1]));
            current_exec = None;
            continue;
        }

        if let Some(caps) = EXEC_HEADER_RE.captures(line) {
            current_exec = Some(caps[1].to_string());
            continue;
        }

        if line.starts_with("Total time") {
            let (Some(flag_idx), Some(exec)) = (current_flag, current_exec.as_deref()) else {
                continue;
            };
            let token = line
                .split_once('=')
                .map(|(_, rest)| rest.trim())
                .and_then(|rest| rest.split_whitespace().next())
                .unwrap_or("");
            let value = parse_float(token, idx + 1)?;
            runs.flags[flag_idx].exec_entry(exec).samples.push(value);
            current_exec = None;
        }
    }

    Ok(runs)
}

/// Parse a saved summary file back into its sections.
///
/// Any line ending with `:` that is not itself a data line opens a new
/// section; data lines before the first section are skipped.
pub fn parse_summary(text: &str) -> Result<SobelSummaryFile, ParseError> {
    let mut file = SobelSummaryFile::default();

    for (idx, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(caps) = SUMMARY_LINE_RE.captures(line) {
            let entry = ExecSummary {
                name: caps[1].to_string(),
                avg: parse_float(&caps[2], idx + 1)?,
                std: parse_float(&caps[3], idx + 1)?,
            };
            if let Some(section) = file.sections.last_mut() {
                section.entries.push(entry);
            }
            continue;
        }

        if let Some(label) = line.strip_suffix(':') {
            file.sections.push(SummarySection {
                label: label.to_string(),
                entries: Vec::new(),
            });
        }
    }

    Ok(file)
}
