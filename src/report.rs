//! Text summary builders for CLI output and saved summary files.

use crate::model::{KmeansReport, SobelReport};

/// Pre-formatted lines for text output.
pub struct TextSummary {
    pub lines: Vec<String>,
}

/// Human-readable Sobel report: one section per flag set, baseline first.
pub fn sobel_text(report: &SobelReport) -> TextSummary {
    let mut lines = Vec::new();

    for section in &report.flag_sections {
        lines.push(format!("=== {} ===", section.flag_set));
        for row in &section.rows {
            let speedup = match row.row.speedup {
                Some(sp) => format!(" (speedup {sp:.2}x)"),
                None => String::new(),
            };
            lines.push(format!(
                "{}: {:.4} ± {:.4} seconds{}",
                row.executable, row.row.average, row.row.std_dev, speedup
            ));
        }
        lines.push(String::new());
    }

    TextSummary { lines }
}

/// The `execution_times.txt` body for a Sobel report, in exactly the format
/// `parse::sobel::parse_summary` reads back.
pub fn sobel_summary_file(report: &SobelReport) -> Vec<String> {
    let mut lines = Vec::new();
    for section in &report.flag_sections {
        lines.push(format!("{}:", section.flag_set));
        for row in &section.rows {
            lines.push(format!(
                "{}: {:.6} ± {:.6} seconds",
                row.executable, row.row.average, row.row.std_dev
            ));
        }
        lines.push(String::new());
    }
    lines
}

/// The k-means performance table.
pub fn kmeans_text(report: &KmeansReport) -> TextSummary {
    let mut lines = Vec::new();

    lines.push("=== Performance Summary ===".to_string());
    lines.push(format!("Sequential average time: {:.4} s", report.seq_avg));
    lines.push(format!(
        "{:>8} | {:>12} | {:>10} | {:>8} | {:>15}",
        "Threads", "Avg Time (s)", "Std (s)", "Speedup", "Efficiency (%)"
    ));
    lines.push("-".repeat(68));

    for row in &report.rows {
        let speedup = row
            .row
            .speedup
            .map_or_else(|| "-".to_string(), |sp| format!("{sp:.2}"));
        let efficiency = row
            .row
            .efficiency
            .map_or_else(|| "-".to_string(), |eff| format!("{eff:.2}"));
        lines.push(format!(
            "{:>8} | {:>12.4} | {:>10.4} | {:>8} | {:>15}",
            row.threads, row.row.average, row.row.std_dev, speedup, efficiency
        ));
    }

    TextSummary { lines }
}
