//! Parse → aggregate → report assembly for each lab.
//!
//! The CLI and chart viewer only consume the report structs built here.

use std::path::Path;

use anyhow::{bail, Result};
use tracing::{debug, info};

use crate::model::{
    utc_timestamp, FlagSection, KmeansReport, SobelReport, SobelRuns, SobelSummaryFile,
    ThreadSummary, VariantRow,
};
use crate::parse::{self, ParseError};
use crate::stats::{self, SummaryRow};

/// Sobel run mode: aggregate a consolidated build/run log.
///
/// A log with no recognizable configuration at all is fatal.
pub fn sobel_from_run_results(input: &Path) -> Result<SobelReport> {
    let text = parse::read_log(input)?;
    let runs = parse::sobel::parse_run_results(&text)?;
    if runs.flags.iter().all(|f| f.executables.is_empty()) {
        bail!("no results found in {}", input.display());
    }
    debug!(flag_sets = runs.flags.len(), "parsed run results");
    Ok(sobel_report_from_runs(&runs))
}

/// Sobel plot-only mode: rebuild the report from a saved summary file.
pub fn sobel_from_summary(path: &Path) -> Result<SobelReport> {
    let text = match parse::read_log(path) {
        Ok(text) => text,
        Err(ParseError::MissingLog { path }) => bail!(
            "no execution times found at {}; run `perflab sobel run` first",
            path.display()
        ),
        Err(e) => return Err(e.into()),
    };
    let summary = parse::sobel::parse_summary(&text)?;
    if summary.is_empty() {
        bail!("no results found in {}", path.display());
    }
    Ok(sobel_report_from_summary(&summary))
}

/// k-means: aggregate the sequential baseline and the thread sweep.
///
/// A missing or empty `run_seq.log` is fatal; a sweep with no thread logs is
/// not, the caller reports "no results" and exits cleanly.
pub fn kmeans(log_dir: &Path) -> Result<Option<KmeansReport>> {
    let seq_path = log_dir.join("run_seq.log");
    let seq_text = parse::read_log(&seq_path)?;
    let seq_samples = parse::kmeans::parse_timings(&seq_text)?;
    let Some(seq_avg) = stats::mean(&seq_samples) else {
        bail!(
            "no sequential timing entries found in {}",
            seq_path.display()
        );
    };

    let data = parse::kmeans::collect_thread_logs(log_dir)?;
    if data.is_empty() {
        return Ok(None);
    }
    info!(
        seq_avg,
        thread_counts = data.len(),
        "aggregating thread sweep"
    );

    let mut rows = Vec::new();
    for (threads, samples) in data {
        if let Some(row) = stats::summarize(&samples, Some(seq_avg), Some(threads)) {
            rows.push(ThreadSummary {
                threads,
                samples,
                row,
            });
        }
    }

    Ok(Some(KmeansReport {
        timestamp_utc: utc_timestamp(),
        seq_avg,
        rows,
    }))
}

/// The table row a fast-build executable shares with its standard sibling.
fn base_variant(name: &str) -> &str {
    name.strip_suffix("_fast").unwrap_or(name)
}

fn sobel_report_from_runs(runs: &SobelRuns) -> SobelReport {
    let mut variants: Vec<String> = Vec::new();
    for flag in &runs.flags {
        for exec in &flag.executables {
            let variant = base_variant(&exec.name);
            if !variants.iter().any(|v| v == variant) {
                variants.push(variant.to_string());
            }
        }
    }

    let mut table = vec![vec![None; runs.flags.len()]; variants.len()];
    let mut flag_sections = Vec::new();

    for (col, flag) in runs.flags.iter().enumerate() {
        // first-seen executable in the group is the speedup baseline
        let baseline_avg = flag
            .executables
            .first()
            .and_then(|e| stats::mean(&e.samples));

        let mut rows = Vec::new();
        for exec in &flag.executables {
            let Some(row) = stats::summarize(&exec.samples, baseline_avg, None) else {
                continue;
            };
            if let Some(ri) = variants.iter().position(|v| v == base_variant(&exec.name)) {
                table[ri][col] = Some(row.average);
            }
            rows.push(VariantRow {
                executable: exec.name.clone(),
                row,
            });
        }
        flag_sections.push(FlagSection {
            flag_set: flag.flag_set.clone(),
            rows,
        });
    }

    SobelReport {
        timestamp_utc: utc_timestamp(),
        flag_sections,
        variants,
        table,
    }
}

fn sobel_report_from_summary(summary: &SobelSummaryFile) -> SobelReport {
    let mut variants: Vec<String> = Vec::new();
    for section in &summary.sections {
        for entry in &section.entries {
            let variant = base_variant(&entry.name);
            if !variants.iter().any(|v| v == variant) {
                variants.push(variant.to_string());
            }
        }
    }

    let mut table = vec![vec![None; summary.sections.len()]; variants.len()];
    let mut flag_sections = Vec::new();

    for (col, section) in summary.sections.iter().enumerate() {
        let baseline_avg = section
            .entries
            .first()
            .map(|e| e.avg)
            .filter(|avg| *avg > 0.0);

        let mut rows = Vec::new();
        for entry in &section.entries {
            let speedup = match baseline_avg {
                Some(base) if entry.avg > 0.0 => Some(base / entry.avg),
                _ => None,
            };
            if let Some(ri) = variants.iter().position(|v| v == base_variant(&entry.name)) {
                table[ri][col] = Some(entry.avg);
            }
            rows.push(VariantRow {
                executable: entry.name.clone(),
                row: SummaryRow {
                    average: entry.avg,
                    std_dev: entry.std,
                    speedup,
                    efficiency: None,
                },
            });
        }
        flag_sections.push(FlagSection {
            flag_set: section.label.clone(),
            rows,
        });
    }

    SobelReport {
        timestamp_utc: utc_timestamp(),
        flag_sections,
        variants,
        table,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::sobel::parse_run_results;

    #[test]
    fn run_report_marks_missing_cells_as_gaps() {
        let text = "\
=== Building with -O0 ===
--- sobel_orig (CFLAGS=-O0) ---
Total time = 4.0 seconds
--- sobel_cse (CFLAGS=-O0) ---
Total time = 2.0 seconds
=== Building with -O2 ===
--- sobel_orig (CFLAGS=-O2) ---
Total time = 1.0 seconds
";
        let runs = parse_run_results(text).unwrap();
        let report = sobel_report_from_runs(&runs);

        assert_eq!(report.variants, vec!["sobel_orig", "sobel_cse"]);
        assert_eq!(report.table[0], vec![Some(4.0), Some(1.0)]);
        // sobel_cse was never built with -O2
        assert_eq!(report.table[1], vec![Some(2.0), None]);

        let o0 = &report.flag_sections[0];
        assert!((o0.rows[0].row.speedup.unwrap() - 1.0).abs() < 1e-12);
        assert!((o0.rows[1].row.speedup.unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn run_report_orders_flag_sets_first_seen() {
        let text = "\
=== Building with -O3 ===
--- sobel_orig (CFLAGS=-O3) ---
Total time = 1.0 seconds
=== Building with -O0 ===
--- sobel_orig (CFLAGS=-O0) ---
Total time = 4.0 seconds
";
        let runs = parse_run_results(text).unwrap();
        let report = sobel_report_from_runs(&runs);
        let labels: Vec<&str> = report
            .flag_sections
            .iter()
            .map(|s| s.flag_set.as_str())
            .collect();
        assert_eq!(labels, vec!["-O3", "-O0"]);
    }

    #[test]
    fn fast_builds_share_the_variant_row() {
        let summary = crate::parse::sobel::parse_summary(
            "\
Standard Executables:
sobel_orig: 4.0 ± 0.1 seconds

Fast Executables:
sobel_orig_fast: 1.0 ± 0.1 seconds
",
        )
        .unwrap();
        let report = sobel_report_from_summary(&summary);
        assert_eq!(report.variants, vec!["sobel_orig"]);
        assert_eq!(report.table, vec![vec![Some(4.0), Some(1.0)]]);
    }

    #[test]
    fn summary_report_omits_speedup_on_zero_baseline() {
        let summary = crate::parse::sobel::parse_summary(
            "\
Standard Executables:
sobel_orig: 0.0 ± 0.0 seconds
sobel_cse: 2.0 ± 0.1 seconds
",
        )
        .unwrap();
        let report = sobel_report_from_summary(&summary);
        for row in &report.flag_sections[0].rows {
            assert_eq!(row.row.speedup, None);
        }
    }
}
